#![deny(missing_docs)]
#![deny(unsafe_code)]

/*! # txauth

Validation and signing of UTXO transactions that spend pay-to-public-key-hash outputs.

Given a transaction and a way to look up the outputs it spends, the crate derives the exact
bytes each input signs, checks every input's signature against the output it spends, and
checks that the transaction creates no value. Signing uses the same preimage derivation.

## Usage
```
use num_bigint::BigUint;
use txauth::address::create_lock_script_for_address;
use txauth::messages::{OutPoint, Tx, TxIn, TxOut};
use txauth::network::Network;
use txauth::transaction::sign::apply;
use txauth::utxo::UtxoSet;
use txauth::validation::{validate, Verdict};
use txauth::wallet::PrivateKey;

let key = PrivateKey::from_secret(&BigUint::from(8675309u32)).unwrap();
let spent = OutPoint::from_txid("0d6fe5213c0b3291f208cba8bfb59b7476dffacc4e5cb66f6eb20a080843a299", 13).unwrap();
let mut utxos = UtxoSet::new(Network::Testnet);
utxos.insert(spent, TxOut::new(33_000_000, create_lock_script_for_address("mzx5YhAH9kNHtcN481u6WkjeHjYtVeKVh2", Network::Testnet).unwrap()));

let pay = create_lock_script_for_address("mnrVtF8DWjMu839VW3rBfgYaAfKk8983Xf", Network::Testnet).unwrap();
let change = create_lock_script_for_address("mzx5YhAH9kNHtcN481u6WkjeHjYtVeKVh2", Network::Testnet).unwrap();
let mut tx = Tx::new(
    vec![TxIn::new(spent)],
    vec![TxOut::new(10_000_000, pay), TxOut::new(22_990_000, change)],
    Network::Testnet,
);
apply(&mut tx, 0, &key, &utxos).unwrap();
assert_eq!(validate(&tx, &utxos).unwrap(), Verdict::Accept);
```

## Logging
Events are emitted with `tracing`. No subscriber is installed.
*/

pub mod address;
pub mod messages;
pub mod network;
pub mod script;
pub mod transaction;
pub mod util;
pub mod utxo;
pub mod validation;
pub mod wallet;

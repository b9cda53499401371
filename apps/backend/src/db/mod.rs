pub mod txn;

pub use txn::{with_read_txn, with_txn, TxnFuture};

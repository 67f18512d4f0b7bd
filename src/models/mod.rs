pub mod order;

pub use order::{
    OrderConfirmation, OrderKind, OrderRequest, OrderType, RawOrderInput, Side, TimeInForce,
};

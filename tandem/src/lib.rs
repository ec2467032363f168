pub use tandem_core::model::PeerId;

pub mod model {
    pub use tandem_core::model::*;
}

#[cfg(feature = "call")]
pub mod call {
    pub use tandem_call::*;
}

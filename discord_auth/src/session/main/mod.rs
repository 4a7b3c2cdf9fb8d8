mod codec;
mod cookie;

pub use codec::SessionCodec;
pub use cookie::SessionStore;

#![doc = r"Identity, persistent state and scheduling pieces for the Trellis toolkit."]

pub mod collections;
pub mod identity;
pub mod platform;
pub mod state;

pub use identity::{ElementKey, IdentityError, KeyVendor};
pub use platform::{FrameRequester, RuntimeScheduler};
pub use state::{StateCache, StateSetter};

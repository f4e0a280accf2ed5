pub mod initialize_stream;
pub mod preview_vested;
pub mod status_of;
pub mod withdraw;

pub use initialize_stream::*;
pub use preview_vested::*;
pub use status_of::*;
pub use withdraw::*;

pub mod compare;
pub mod compile;
pub mod sweep;
pub mod verify;

use std::sync::Arc;

use aletheia_falsify::Registry;
use aletheia_plugins::builtin_registry;

/// Registry shared by every subcommand.
pub fn shared_registry() -> Arc<Registry> {
    Arc::new(builtin_registry())
}

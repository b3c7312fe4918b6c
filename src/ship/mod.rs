pub mod shell;
pub mod vessel;

pub use shell::{ShellBuilder, ShellKind, ShellParameters};
pub use vessel::{presets, LoadedShell, Ship, ShipBuilder, ShipClass};

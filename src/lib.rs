//! Workspace meta-package. The actual crates live under `crates/`.

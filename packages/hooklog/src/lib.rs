//! Library for `hooklog`, the Claude Code hooks that record and filter what
//! the assistant reads and rotate those records between sessions.

pub mod claude;
pub mod logs;
pub mod monitor;
pub mod session;

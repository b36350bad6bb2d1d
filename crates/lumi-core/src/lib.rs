//! # Lumi Core Library
//!
//! Business logic for Lumi, a small Pomodoro-style focus timer. The terminal
//! frontend (`lumi-cli`) and a desktop dock host are thin layers over this
//! crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a focus/break countdown state machine driven by a
//!   1 s periodic timer registered on an injected [`TimerSource`]
//! - **Dock**: the desktop window's auto-hide/show controller, slide
//!   animation and cursor-following eyes
//! - **Storage**: key-value settings persistence (TOML file or in-memory)
//!
//! Nothing here spawns threads or sleeps. Hosts pump due timers through
//! [`Pump::run_due`]; tests do the same with a [`ManualClock`].
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: countdown state machine
//! - [`DockController`]: dock visibility state machine
//! - [`Settings`]: the four persisted user settings
//! - [`SettingsStore`]: persistence interface

pub mod clock;
pub mod dock;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, Pump, Scheduler, SystemClock, TimerHandle, TimerSource};
pub use dock::{CursorSample, DockCommand, DockController, DockLayout, Point, WindowAnimator};
pub use error::{CoreError, Result, SettingsError};
pub use events::Event;
pub use storage::{MemoryStore, SettingsStore, TomlFileStore};
pub use timer::{FocusTimer, Mode, Settings, TimerSnapshot, TimerTask};

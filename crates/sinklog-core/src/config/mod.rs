//! Logger configuration
//!
//! A YAML document selects the sink kind and its settings:
//!
//! ```yaml
//! kind: file
//! timestamps: true
//! file:
//!   directory: /var/log/myapp
//!   base_name: MyApp
//!   max_size: 4194304
//! ```

mod file;

pub use file::{LoggerConfig, ConsoleSettings, FileSettings};

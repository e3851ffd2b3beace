//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter       | Implements                          | Connects to               |
//! |---------------|-------------------------------------|---------------------------|
//! | `hal`         | SensorPort, ActuatorPort, ClockPort | embedded-hal GPIO / PWM   |
//! | `ds3231`      | ClockPort                           | DS3231 RTC over I²C       |
//! | `sim`         | SensorPort, ActuatorPort, ClockPort | In-memory pin bank        |
//! | `time`        | ClockPort, DelayNs                  | Host wall clock / sleep   |
//! | `log_sink`    | EventSink                           | `log` output              |
//! | `config_file` | ConfigPort                          | JSON file on disk         |

pub mod config_file;
pub mod ds3231;
pub mod hal;
pub mod log_sink;
pub mod sim;
pub mod time;

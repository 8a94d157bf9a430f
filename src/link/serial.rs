//! Opening the real serial port.
//!
//! The line settings are whatever the machine's RS423 port is set to.  The timeout is the
//! idle time that marks the end of a reply, so it has to be longer than the longest pause
//! the machine makes while printing (e.g. while it seeks the next track during `*DUMP`).

use std::time::Duration;
use serialport::{DataBits,Parity,StopBits,SerialPort};
use log::info;
use super::Error;

pub const DEFAULT_PATH: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD: u32 = 9600;
pub const DEFAULT_TIMEOUT: f64 = 3.0;

#[derive(Clone,Debug)]
pub struct SerialConfig {
    pub path: String,
    pub baud: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub timeout: Duration
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            baud: DEFAULT_BAUD,
            data_bits: DataBits::Seven,
            parity: Parity::Even,
            stop_bits: StopBits::One,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT)
        }
    }
}

pub fn parity_from_str(s: &str) -> Option<Parity> {
    match s {
        "none" => Some(Parity::None),
        "odd" => Some(Parity::Odd),
        "even" => Some(Parity::Even),
        _ => None
    }
}

pub fn data_bits_from_u8(bits: u8) -> Option<DataBits> {
    match bits {
        5 => Some(DataBits::Five),
        6 => Some(DataBits::Six),
        7 => Some(DataBits::Seven),
        8 => Some(DataBits::Eight),
        _ => None
    }
}

pub fn stop_bits_from_u8(bits: u8) -> Option<StopBits> {
    match bits {
        1 => Some(StopBits::One),
        2 => Some(StopBits::Two),
        _ => None
    }
}

/// Open and configure the port.  The returned handle closes the port when dropped.
pub fn open(config: &SerialConfig) -> Result<Box<dyn SerialPort>,Error> {
    info!("opening {} at {} baud",config.path,config.baud);
    let port = serialport::new(&config.path,config.baud)
        .data_bits(config.data_bits)
        .parity(config.parity)
        .stop_bits(config.stop_bits)
        .timeout(config.timeout)
        .open()
        .map_err(|e| Error::Transport(e.into()))?;
    Ok(port)
}

#[test]
fn default_line_settings() {
    let config = SerialConfig::default();
    assert_eq!(config.baud,9600);
    assert_eq!(config.data_bits,DataBits::Seven);
    assert_eq!(config.parity,Parity::Even);
    assert_eq!(config.stop_bits,StopBits::One);
    assert_eq!(config.timeout,Duration::from_millis(3000));
}

#[test]
fn line_setting_names() {
    assert_eq!(parity_from_str("odd"),Some(Parity::Odd));
    assert_eq!(parity_from_str("mark"),None);
    assert_eq!(data_bits_from_u8(8),Some(DataBits::Eight));
    assert_eq!(data_bits_from_u8(9),None);
    assert_eq!(stop_bits_from_u8(2),Some(StopBits::Two));
    assert_eq!(stop_bits_from_u8(0),None);
}

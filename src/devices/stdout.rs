use std::io::{stdout, Write};

use crate::serial::SerialDevice;

/// Serial sink that prints every received byte to stdout,
/// useful to surface the output of test ROMs that report
/// through the serial port.
pub struct StdoutDevice {
    flush: bool,
}

impl StdoutDevice {
    pub fn new(flush: bool) -> Self {
        Self { flush }
    }
}

impl SerialDevice for StdoutDevice {
    fn send(&mut self) -> u8 {
        0xff
    }

    fn receive(&mut self, byte: u8) {
        print!("{}", byte as char);
        if self.flush {
            stdout().flush().unwrap();
        }
    }

    fn description(&self) -> String {
        String::from("Stdout")
    }

    fn state(&self) -> String {
        String::from("")
    }
}

impl Default for StdoutDevice {
    fn default() -> Self {
        Self::new(true)
    }
}

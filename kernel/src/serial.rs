use core::fmt::{self, Write};

use lazy_static::lazy_static;
use spin::Mutex;
use uart_16550::SerialPort;

const COM1: u16 = 0x3F8;

lazy_static! {
    static ref SERIAL1: Mutex<SerialPort> = {
        let mut serial_port = unsafe { SerialPort::new(COM1) };
        serial_port.init();
        Mutex::new(serial_port)
    };
}

/// Writes one formatted line to COM1.
pub fn write_line(args: fmt::Arguments) {
    let mut serial = SERIAL1.lock();
    let _ = serial.write_fmt(args);
    serial.send(b'\r');
    serial.send(b'\n');
}

/// Like [`write_line`] but gives up instead of spinning when the port is
/// already held, as it may be when a panic interrupts a log call.
pub fn write_line_try(args: fmt::Arguments) {
    let Some(mut serial) = SERIAL1.try_lock() else {
        return;
    };
    let _ = serial.write_fmt(args);
    serial.send(b'\r');
    serial.send(b'\n');
}

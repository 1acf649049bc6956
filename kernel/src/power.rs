use x86_64::instructions::interrupts;

use crate::device::PowerControl;

const ACPI_PM1A_CNT_QEMU: u16 = 0x604;
const ACPI_PM1A_CNT_BOCHS: u16 = 0xB004;
const ACPI_SLEEP_S5: u16 = 0x2000;
const KBC_COMMAND: u16 = 0x64;
const KBC_PULSE_RESET: u8 = 0xFE;

/// Power control through the emulator ACPI ports and the keyboard
/// controller reset line. If the machine ignores both, the CPU parks.
pub struct AcpiPower;

fn halt_forever() -> ! {
    interrupts::disable();
    loop {
        unsafe {
            x86::halt();
        }
    }
}

impl PowerControl for AcpiPower {
    fn halt(&mut self) -> ! {
        log::info!("power: shutting down");
        unsafe {
            x86::io::outw(ACPI_PM1A_CNT_QEMU, ACPI_SLEEP_S5);
            x86::io::outw(ACPI_PM1A_CNT_BOCHS, ACPI_SLEEP_S5);
        }
        log::warn!("power: ACPI shutdown ignored, halting");
        halt_forever()
    }

    fn reboot(&mut self) -> ! {
        log::info!("power: rebooting");
        unsafe {
            x86::io::outb(KBC_COMMAND, KBC_PULSE_RESET);
        }
        log::warn!("power: reset line ignored, halting");
        halt_forever()
    }
}

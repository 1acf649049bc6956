#![no_std]
#![no_main]

use bootloader_api::{config::BootloaderConfig, entry_point, BootInfo};
use core::panic::PanicInfo;
use log::LevelFilter;

use lumen::framebuffer::LinearFramebuffer;
use lumen::keyboard::Ps2Keyboard;
use lumen::power::AcpiPower;
use lumen::{logger, ps2, serial, Desktop, ShellConfig};

pub const OS_NAME: &str = "Lumen";

static SHELL: ShellConfig = ShellConfig::DEFAULT;

// The desktop keeps its frame and session on the stack.
static BOOTLOADER_CONFIG: BootloaderConfig = {
    let mut cfg = BootloaderConfig::new_default();
    cfg.kernel_stack_size = 256 * 1024;
    cfg
};

entry_point!(kernel_main, config = &BOOTLOADER_CONFIG);

fn kernel_main(boot_info: &'static mut BootInfo) -> ! {
    logger::init(LevelFilter::Info);
    log::info!("{} {} booting", OS_NAME, env!("CARGO_PKG_VERSION"));

    if !ps2::init_controller() {
        log::warn!("ps2: controller init failed");
    }
    let keyboard = Ps2Keyboard::init().unwrap_or_else(|| {
        log::warn!("ps2: keyboard did not ack, polling anyway");
        Ps2Keyboard::assume_ready()
    });

    let video = match LinearFramebuffer::from_boot(boot_info.framebuffer.as_mut()) {
        Ok(video) => video,
        Err(err) => {
            log::error!("video: {}", err.as_str());
            halt_loop();
        }
    };

    Desktop::new(video, keyboard, AcpiPower, &SHELL).run()
}

fn halt_loop() -> ! {
    loop {
        unsafe {
            x86::halt();
        }
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    serial::write_line_try(format_args!("=== KERNEL PANIC ==="));
    serial::write_line_try(format_args!("{info}"));
    halt_loop()
}

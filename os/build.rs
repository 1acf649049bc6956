use std::env;
use std::path::PathBuf;

use bootloader::DiskImageBuilder;

fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set by cargo"));
    let kernel = PathBuf::from(
        env::var_os("CARGO_BIN_FILE_KERNEL_kernel").expect("kernel artifact dependency missing"),
    );

    // BIOS only: the desktop targets the default QEMU pc machine.
    let bios_path = out_dir.join("lumen-bios.img");
    DiskImageBuilder::new(kernel)
        .create_bios_image(&bios_path)
        .expect("failed to create BIOS disk image");

    println!("cargo:rustc-env=BIOS_PATH={}", bios_path.display());
}

fn main() {
    let bios_path = env!("BIOS_PATH");
    println!("{bios_path}");
    println!("run with: qemu-system-x86_64 -drive format=raw,file={bios_path} -serial stdio");
}

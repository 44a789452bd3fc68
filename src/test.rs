//! Helpers for the construction of test machines, used by the
//! unit tests and the benches.

use dotmatrix_common::error::Error;

use crate::{
    devices::buffer::BufferDevice,
    gb::GameBoy,
    rom::{compute_header_checksum, RomSize, ROM_BANK_SIZE},
};

#[derive(Default)]
pub struct TestOptions {
    pub ppu_enabled: Option<bool>,
    pub apu_enabled: Option<bool>,
    pub dma_enabled: Option<bool>,
    pub timer_enabled: Option<bool>,
    pub serial_enabled: Option<bool>,
}

/// Builds a booted machine with a buffer serial sink attached, so
/// that serial output of the running ROM can be asserted on.
pub fn build_test(options: TestOptions) -> Box<GameBoy> {
    let device = Box::<BufferDevice>::default();
    let mut game_boy = Box::new(GameBoy::new());
    game_boy.set_ppu_enabled(options.ppu_enabled.unwrap_or(true));
    game_boy.set_apu_enabled(options.apu_enabled.unwrap_or(true));
    game_boy.set_dma_enabled(options.dma_enabled.unwrap_or(true));
    game_boy.set_timer_enabled(options.timer_enabled.unwrap_or(true));
    game_boy.set_serial_enabled(options.serial_enabled.unwrap_or(true));
    game_boy.attach_serial(device);
    game_boy.boot();
    game_boy
}

/// Builds a machine, loads the provided ROM image and runs it for
/// the requested number of cycles.
pub fn run_test(
    rom_data: &[u8],
    max_cycles: Option<u64>,
    options: TestOptions,
) -> Result<Box<GameBoy>, Error> {
    let max_cycles = max_cycles.unwrap_or(u64::MAX);
    let mut game_boy = build_test(options);
    game_boy.load_rom(rom_data, None)?;
    game_boy.clocks_cycles(max_cycles as usize);
    Ok(game_boy)
}

/// Runs the provided ROM image and returns whatever it printed
/// through the serial port.
pub fn run_serial_test(
    rom_data: &[u8],
    max_cycles: Option<u64>,
    options: TestOptions,
) -> Result<(String, Box<GameBoy>), Error> {
    let game_boy = run_test(rom_data, max_cycles, options)?;
    let output = game_boy.serial_i().device().state();
    Ok((output, game_boy))
}

/// Builds a minimal cartridge image with a valid header for the
/// provided type, ROM size and RAM size codes. The body is NOP
/// filled and a program may be patched in starting at 0x0100.
pub fn make_test_rom(rom_type: u8, rom_size: u8, ram_size: u8) -> Vec<u8> {
    let banks = RomSize::from_u8(rom_size).rom_banks().max(2);
    let mut data = vec![0u8; banks as usize * ROM_BANK_SIZE];
    data[0x0134..0x0138].copy_from_slice(b"TEST");
    data[0x0147] = rom_type;
    data[0x0148] = rom_size;
    data[0x0149] = ram_size;
    data[0x014d] = compute_header_checksum(&data);
    data
}

#[cfg(test)]
mod tests {
    use super::{build_test, make_test_rom, run_serial_test, TestOptions};

    #[test]
    fn test_build_test_defaults() {
        let gb = build_test(TestOptions::default());
        assert!(gb.ppu_enabled());
        assert!(gb.apu_enabled());
        assert_eq!(gb.cpu_i().pc(), 0x0100);
    }

    #[test]
    fn test_build_test_disables() {
        let gb = build_test(TestOptions {
            ppu_enabled: Some(false),
            timer_enabled: Some(false),
            ..Default::default()
        });
        assert!(!gb.ppu_enabled());
        assert!(!gb.timer_enabled());
        assert!(gb.dma_enabled());
    }

    #[test]
    fn test_serial_output_capture() {
        let mut rom = make_test_rom(0x00, 0x00, 0x00);
        // LD A, 'P'; LDH (SB), A; LD A, 0x81; LDH (SC), A; JR -2
        let program = [0x3e, 0x50, 0xe0, 0x01, 0x3e, 0x81, 0xe0, 0x02, 0x18, 0xfe];
        rom[0x0100..0x0100 + program.len()].copy_from_slice(&program);
        rom[0x014d] = super::compute_header_checksum(&rom);

        let (output, _gb) = run_serial_test(&rom, Some(10000), TestOptions::default()).unwrap();
        assert_eq!(output, "P");
    }

    #[test]
    fn test_make_test_rom_header() {
        let data = make_test_rom(0x01, 0x02, 0x03);
        assert_eq!(data.len(), 8 * 16384);
        assert_eq!(data[0x0147], 0x01);
        assert_eq!(&data[0x0134..0x0138], b"TEST");
    }
}

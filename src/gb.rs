//! Game Boy emulation entrypoint and associated functions and structures.
//!
//! Most of the meaningful publicly available functions and structures to
//! build a working emulator should be present here.
//!
//! # Examples
//!
//! Creates a simple [`GameBoy`] instance, boots it and runs a frame.
//!
//! ```rust
//! use dotmatrix::gb::GameBoy;
//! let mut game_boy = GameBoy::new();
//! game_boy.load_rom_empty().unwrap();
//! game_boy.boot();
//! let cycles = game_boy.next_frame();
//! println!("Ran {} cycles", cycles);
//! ```

use std::fmt::{self, Display, Formatter};

use dotmatrix_common::error::Error;

use crate::{
    apu::Apu,
    consts::{
        BGP_ADDR, IF_ADDR, LCDC_ADDR, NR11_ADDR, NR12_ADDR, NR13_ADDR, NR14_ADDR, NR50_ADDR,
        NR51_ADDR, NR52_ADDR, OBP0_ADDR, OBP1_ADDR, P1_ADDR,
    },
    cpu::Cpu,
    devices::{buffer::BufferDevice, stdout::StdoutDevice},
    dma::Dma,
    mmu::{Components, Mmu},
    pad::{Pad, PadKey},
    ppu::{
        Ppu, PpuMode, DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, FRAME_BUFFER_RGB_SIZE,
    },
    rom::{compute_header_checksum, Cartridge},
    serial::{NullDevice, Serial, SerialDevice},
    timer::Timer,
};

/// Aggregate snapshot of the CPU and PPU registers, a cheap way
/// for hosts and debuggers to observe the machine state.
pub struct Registers {
    pub pc: u16,
    pub sp: u16,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub scy: u8,
    pub scx: u8,
    pub wy: u8,
    pub wx: u8,
    pub ly: u8,
    pub lyc: u8,
}

/// Top level structure that abstracts the complete DMG system,
/// owning the CPU which in turn owns the MMU and every peripheral.
///
/// Should serve as the main entry-point API.
pub struct GameBoy {
    /// If the PPU is enabled, it will be clocked.
    ppu_enabled: bool,

    /// If the APU is enabled, it will be clocked.
    apu_enabled: bool,

    /// If the DMA is enabled, it will be clocked.
    dma_enabled: bool,

    /// If the timer is enabled, it will be clocked.
    timer_enabled: bool,

    /// If the serial is enabled, it will be clocked.
    serial_enabled: bool,

    /// The frequency at which the system is being emulated, used
    /// as a hint by components that resample against real time.
    clock_freq: u32,

    /// Reference to the Game Boy CPU component to be used as the
    /// main element of the system, when clocked, the amount of
    /// ticks from it drives the rest of the components.
    cpu: Cpu,
}

impl GameBoy {
    /// The logic frequency of the Game Boy CPU in Hz.
    pub const CPU_FREQ: u32 = 4194304;

    /// The visual frequency (refresh rate) of the Game Boy,
    /// close to 60 Hz.
    pub const VISUAL_FREQ: f32 = 59.7275;

    /// The number of cycles taken to run a complete frame loop
    /// in the Game Boy's PPU (in CPU cycles).
    pub const LCD_CYCLES: u32 = 70224;

    pub fn new() -> Self {
        let components = Components {
            ppu: Ppu::default(),
            apu: Apu::default(),
            dma: Dma::default(),
            pad: Pad::default(),
            timer: Timer::default(),
            serial: Serial::default(),
        };
        let mmu = Mmu::new(components);
        let cpu = Cpu::new(mmu);

        Self {
            ppu_enabled: true,
            apu_enabled: true,
            dma_enabled: true,
            timer_enabled: true,
            serial_enabled: true,
            clock_freq: GameBoy::CPU_FREQ,
            cpu,
        }
    }

    /// Checks if the provided data would be accepted as a valid
    /// cartridge image.
    pub fn verify_rom(data: &[u8]) -> bool {
        Cartridge::from_data(data).is_ok()
    }

    pub fn reset(&mut self) {
        self.ppu().reset();
        self.apu().reset();
        self.dma().reset();
        self.pad().reset();
        self.timer().reset();
        self.serial().reset();
        self.mmu().reset();
        self.cpu.reset();
    }

    /// Jumps the machine to the state left behind by the DMG boot
    /// ROM: CPU registers, hardware register file and timer phase,
    /// so that cartridges run without a boot ROM image.
    pub fn boot(&mut self) {
        self.cpu.boot();

        // the hardware registers as the boot ROM leaves them,
        // including the channel 1 "ding" still ringing
        self.mmu().write(P1_ADDR, 0xcf);
        self.mmu().write(IF_ADDR, 0x01);
        self.mmu().write(NR52_ADDR, 0x80);
        self.mmu().write(NR50_ADDR, 0x77);
        self.mmu().write(NR51_ADDR, 0xf3);
        self.mmu().write(NR11_ADDR, 0x80);
        self.mmu().write(NR12_ADDR, 0xf3);
        self.mmu().write(NR13_ADDR, 0x83);
        self.mmu().write(NR14_ADDR, 0x87);
        self.mmu().write(LCDC_ADDR, 0x91);
        self.mmu().write(BGP_ADDR, 0xfc);
        self.mmu().write(OBP0_ADDR, 0xff);
        self.mmu().write(OBP1_ADDR, 0xff);

        // DIV phase observed right after the boot ROM hands over
        self.timer().set_system_counter(0xabcc);
    }

    /// Advances the system by one CPU step, ticking every other
    /// component by the number of cycles the step consumed.
    ///
    /// The amount of cycles executed by the CPU is returned.
    pub fn clock(&mut self) -> u16 {
        let cycles = self.cpu_clock() as u16;
        self.clock_devices(cycles);
        cycles
    }

    /// Equivalent to `clock()` but allows the execution of
    /// multiple clock operations in a single call.
    pub fn clocks(&mut self, count: usize) -> u64 {
        let mut cycles = 0u64;
        for _ in 0..count {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Clocks the emulator until the provided limit of cycles is
    /// reached, returning the amount of cycles clocked.
    pub fn clocks_cycles(&mut self, limit: usize) -> u64 {
        let mut cycles = 0u64;
        while cycles < limit as u64 {
            cycles += self.clock() as u64;
        }
        cycles
    }

    /// Runs the system until the PPU signals a completed frame
    /// (V-Blank entry).
    ///
    /// A bounded cycle budget of two frames guarantees progress
    /// when the LCD has been switched off by the guest.
    pub fn next_frame(&mut self) -> u32 {
        let mut cycles = 0u32;
        let current_frame = self.ppu_frame();
        while self.ppu_frame() == current_frame {
            cycles += self.clock() as u32;
            if cycles >= Self::LCD_CYCLES * 2 {
                break;
            }
        }
        cycles
    }

    /// Runs the system until the PC reaches the provided address,
    /// useful for test setups.
    pub fn step_to(&mut self, addr: u16) -> u32 {
        let mut cycles = 0u32;
        while self.cpu.pc() != addr {
            cycles += self.clock() as u32;
        }
        cycles
    }

    #[inline(always)]
    fn clock_devices(&mut self, cycles: u16) {
        if self.ppu_enabled {
            self.ppu_clock(cycles);
        }
        if self.apu_enabled {
            self.apu_clock(cycles);
        }
        if self.dma_enabled {
            self.dma_clock(cycles);
        }
        if self.timer_enabled {
            self.timer_clock(cycles);
        }
        if self.serial_enabled {
            self.serial_clock(cycles);
        }
    }

    pub fn key_press(&mut self, key: PadKey) {
        self.pad().key_press(key);
    }

    pub fn key_lift(&mut self, key: PadKey) {
        self.pad().key_lift(key);
    }

    pub fn cpu_clock(&mut self) -> u8 {
        self.cpu.clock()
    }

    pub fn ppu_clock(&mut self, cycles: u16) {
        self.ppu().clock(cycles)
    }

    pub fn apu_clock(&mut self, cycles: u16) {
        self.apu().clock(cycles)
    }

    pub fn dma_clock(&mut self, cycles: u16) {
        self.mmu().clock_dma(cycles);
    }

    pub fn timer_clock(&mut self, cycles: u16) {
        self.timer().clock(cycles)
    }

    pub fn serial_clock(&mut self, cycles: u16) {
        self.serial().clock(cycles)
    }

    pub fn ppu_ly(&self) -> u8 {
        self.ppu_i().ly()
    }

    pub fn ppu_mode(&self) -> PpuMode {
        self.ppu_i().mode()
    }

    pub fn ppu_frame(&self) -> u16 {
        self.ppu_i().frame_index()
    }

    /// Drains up to `count` stereo frames of PCM audio from the
    /// APU ring buffer, zero filled on underrun.
    pub fn audio_samples(&mut self, count: usize) -> Vec<i16> {
        self.apu().get_samples(count)
    }

    pub fn registers(&self) -> Registers {
        let ppu_registers = self.ppu_i().registers();
        Registers {
            pc: self.cpu.pc,
            sp: self.cpu.sp,
            a: self.cpu.a,
            b: self.cpu.b,
            c: self.cpu.c,
            d: self.cpu.d,
            e: self.cpu.e,
            h: self.cpu.h,
            l: self.cpu.l,
            scy: ppu_registers.scy,
            scx: ppu_registers.scx,
            wy: ppu_registers.wy,
            wx: ppu_registers.wx,
            ly: ppu_registers.ly,
            lyc: ppu_registers.lyc,
        }
    }

    pub fn ppu_enabled(&self) -> bool {
        self.ppu_enabled
    }

    pub fn set_ppu_enabled(&mut self, value: bool) {
        self.ppu_enabled = value;
    }

    pub fn apu_enabled(&self) -> bool {
        self.apu_enabled
    }

    pub fn set_apu_enabled(&mut self, value: bool) {
        self.apu_enabled = value;
    }

    pub fn dma_enabled(&self) -> bool {
        self.dma_enabled
    }

    pub fn set_dma_enabled(&mut self, value: bool) {
        self.dma_enabled = value;
    }

    pub fn timer_enabled(&self) -> bool {
        self.timer_enabled
    }

    pub fn set_timer_enabled(&mut self, value: bool) {
        self.timer_enabled = value;
    }

    pub fn serial_enabled(&self) -> bool {
        self.serial_enabled
    }

    pub fn set_serial_enabled(&mut self, value: bool) {
        self.serial_enabled = value;
    }

    pub fn set_all_enabled(&mut self, value: bool) {
        self.set_ppu_enabled(value);
        self.set_apu_enabled(value);
        self.set_dma_enabled(value);
        self.set_timer_enabled(value);
        self.set_serial_enabled(value);
    }

    pub fn clock_freq(&self) -> u32 {
        self.clock_freq
    }

    pub fn set_clock_freq(&mut self, value: u32) {
        self.clock_freq = value;
        self.apu().set_clock_freq(value);
    }

    pub fn clock_freq_s(&self) -> String {
        format!("{:.02} Mhz", self.clock_freq() as f32 / 1000.0 / 1000.0)
    }

    pub fn attach_null_serial(&mut self) {
        self.attach_serial(Box::<NullDevice>::default());
    }

    pub fn attach_stdout_serial(&mut self) {
        self.attach_serial(Box::<StdoutDevice>::default());
    }

    pub fn attach_buffer_serial(&mut self) {
        self.attach_serial(Box::<BufferDevice>::default());
    }

    pub fn attach_serial(&mut self, device: Box<dyn SerialDevice>) {
        self.serial().set_device(device);
    }

    pub fn display_width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn display_height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn description(&self, column_length: usize) -> String {
        let name_l = format!("{:width$}", "Name", width = column_length);
        let clock_l = format!("{:width$}", "Clock", width = column_length);
        let serial_l = format!("{:width$}", "Serial", width = column_length);
        format!(
            "{}  {}\n{}  {}\n{}  {}",
            name_l,
            "Game Boy (DMG)",
            clock_l,
            self.clock_freq_s(),
            serial_l,
            self.serial_i().device().description(),
        )
    }
}

/// GameBoy implementations that are meant with performance in
/// mind, avoiding copies where possible.
impl GameBoy {
    pub fn cpu(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn cpu_i(&self) -> &Cpu {
        &self.cpu
    }

    pub fn mmu(&mut self) -> &mut Mmu {
        self.cpu.mmu()
    }

    pub fn mmu_i(&self) -> &Mmu {
        self.cpu.mmu_i()
    }

    pub fn ppu(&mut self) -> &mut Ppu {
        self.cpu.mmu().ppu()
    }

    pub fn ppu_i(&self) -> &Ppu {
        self.cpu.mmu_i().ppu_i()
    }

    pub fn apu(&mut self) -> &mut Apu {
        self.cpu.mmu().apu()
    }

    pub fn apu_i(&self) -> &Apu {
        self.cpu.mmu_i().apu_i()
    }

    pub fn dma(&mut self) -> &mut Dma {
        self.cpu.mmu().dma()
    }

    pub fn dma_i(&self) -> &Dma {
        self.cpu.mmu_i().dma_i()
    }

    pub fn pad(&mut self) -> &mut Pad {
        self.cpu.mmu().pad()
    }

    pub fn pad_i(&self) -> &Pad {
        self.cpu.mmu_i().pad_i()
    }

    pub fn timer(&mut self) -> &mut Timer {
        self.cpu.mmu().timer()
    }

    pub fn timer_i(&self) -> &Timer {
        self.cpu.mmu_i().timer_i()
    }

    pub fn serial(&mut self) -> &mut Serial {
        self.cpu.mmu().serial()
    }

    pub fn serial_i(&self) -> &Serial {
        self.cpu.mmu_i().serial_i()
    }

    pub fn rom(&mut self) -> &mut Cartridge {
        self.mmu().rom()
    }

    pub fn rom_i(&self) -> &Cartridge {
        self.mmu_i().rom_i()
    }

    /// The 160x144 frame buffer as one shade (0 to 3) per pixel.
    pub fn frame_buffer(&self) -> &[u8; DISPLAY_SIZE] {
        self.ppu_i().frame_buffer()
    }

    pub fn frame_buffer_rgb(&self) -> [u8; FRAME_BUFFER_RGB_SIZE] {
        self.ppu_i().frame_buffer_rgb()
    }

    pub fn frame_buffer_argb(&self) -> [u32; DISPLAY_SIZE] {
        self.ppu_i().frame_buffer_argb()
    }

    pub fn load_cartridge(&mut self, rom: Cartridge) -> &mut Cartridge {
        self.mmu().set_rom(rom);
        self.mmu().rom()
    }

    pub fn load_rom(
        &mut self,
        data: &[u8],
        ram_data: Option<&[u8]>,
    ) -> Result<&mut Cartridge, Error> {
        let mut rom = Cartridge::from_data(data)?;
        if let Some(ram_data) = ram_data {
            rom.set_ram_data(ram_data)?;
        }
        Ok(self.load_cartridge(rom))
    }

    /// Loads a blank (NOP filled) 32KB cartridge with a valid
    /// header, useful for tests and benches.
    pub fn load_rom_empty(&mut self) -> Result<&mut Cartridge, Error> {
        let mut data = vec![0u8; 32 * 1024];
        data[0x014d] = compute_header_checksum(&data);
        self.load_rom(&data, None)
    }

    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.mmu().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.mmu().write(addr, value);
    }
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameBoy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description(9))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        consts::{DIV_ADDR, IF_ADDR, LCDC_ADDR, NR52_ADDR, P1_ADDR, STAT_ADDR, TAC_ADDR},
        pad::PadKey,
        ppu::PpuMode,
    };

    use super::GameBoy;

    #[test]
    fn test_boot_state() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();

        assert_eq!(gb.cpu_i().pc(), 0x0100);
        assert_eq!(gb.cpu_i().sp(), 0xfffe);
        assert_eq!(gb.cpu_i().af(), 0x01b0);
        assert_eq!(gb.cpu_i().bc(), 0x0013);
        assert_eq!(gb.cpu_i().de(), 0x00d8);
        assert_eq!(gb.cpu_i().hl(), 0x014d);
        assert!(!gb.cpu_i().ime());

        assert_eq!(gb.mmu().read(DIV_ADDR), 0xab);
        assert_eq!(gb.mmu().read(TAC_ADDR), 0xf8);
        assert_eq!(gb.mmu().read(IF_ADDR), 0xe1);
        assert_eq!(gb.mmu().read(P1_ADDR), 0xcf);
        assert_eq!(gb.mmu().read(LCDC_ADDR), 0x91);
        assert_eq!(gb.mmu().read(STAT_ADDR), 0x86);
        assert_eq!(gb.mmu().read(NR52_ADDR), 0xf1);
    }

    #[test]
    fn test_next_frame() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();

        let frame = gb.ppu_frame();
        let cycles = gb.next_frame();
        assert_eq!(gb.ppu_frame(), frame + 1);
        // the first frame completes at V-Blank entry, after the
        // 144 visible lines of 456 cycles each
        assert!((65600..66000).contains(&cycles));

        // from then on a full frame of 154 lines separates two
        // V-Blank entries
        let cycles = gb.next_frame();
        assert!((70200..70500).contains(&cycles));
    }

    #[test]
    fn test_next_frame_bounded_with_lcd_off() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();
        gb.write_memory(LCDC_ADDR, 0x00);

        let frame = gb.ppu_frame();
        let cycles = gb.next_frame();
        // the frame never completes, the cycle budget kicks in
        assert_eq!(gb.ppu_frame(), frame);
        assert!(cycles >= GameBoy::LCD_CYCLES * 2);
    }

    #[test]
    fn test_mode_invariant_during_frame() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();

        for _ in 0..20000 {
            gb.clock();
            let ly = gb.ppu_ly();
            let is_vblank = gb.ppu_mode() == PpuMode::VBlank;
            assert_eq!(is_vblank, ly >= 144);
        }
    }

    #[test]
    fn test_input_routing() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();

        // select the button bank and press Start
        gb.write_memory(P1_ADDR, 0x10);
        let before = gb.read_memory(P1_ADDR);
        gb.key_press(PadKey::Start);
        assert_ne!(gb.read_memory(P1_ADDR), before);
        assert!(gb.pad_i().int_pad());

        gb.key_lift(PadKey::Start);
        assert_eq!(gb.read_memory(P1_ADDR), before);
    }

    #[test]
    fn test_step_to() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();

        gb.step_to(0x0110);
        assert_eq!(gb.cpu_i().pc(), 0x0110);
    }

    #[test]
    fn test_audio_samples_after_frame() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();
        gb.next_frame();

        let samples = gb.audio_samples(256);
        assert_eq!(samples.len(), 512);
    }

    #[test]
    fn test_frame_buffer_in_range() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();
        gb.next_frame();
        assert!(gb.frame_buffer().iter().all(|pixel| *pixel <= 3));
    }

    #[test]
    fn test_reset() {
        let mut gb = GameBoy::new();
        gb.load_rom_empty().unwrap();
        gb.boot();
        gb.next_frame();

        gb.reset();
        assert_eq!(gb.cpu_i().pc(), 0x0000);
        assert_eq!(gb.ppu_frame(), 0);
        assert_eq!(gb.mmu().read(DIV_ADDR), 0x00);
    }
}

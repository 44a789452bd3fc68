//! MMU (Memory Management Unit) functions and structures.

use crate::{
    apu::Apu,
    consts::{IF_ADDR, P1_ADDR},
    dma::Dma,
    pad::Pad,
    ppu::Ppu,
    rom::Cartridge,
    serial::Serial,
    timer::Timer,
    warnln,
};

pub const WRAM_SIZE: usize = 8192;
pub const HRAM_SIZE: usize = 127;

/// Size of the 0xFEA0-0xFEFF unusable area, modeled as plain
/// storage so that stray accesses never fault.
pub const UNUSED_SIZE: usize = 96;

/// Common contract for every memory mapped component, the MMU
/// delegates bus accesses through this seam.
pub trait BusComponent {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

/// Aggregation structure allowing the bundling of all the
/// peripherals of the system into a single element.
pub struct Components {
    pub ppu: Ppu,
    pub apu: Apu,
    pub dma: Dma,
    pub pad: Pad,
    pub timer: Timer,
    pub serial: Serial,
}

pub struct Mmu {
    /// Register that controls the interrupts that are considered
    /// to be enabled and should be triggered.
    pub ie: u8,

    /// Reference to the PPU (Pixel Processing Unit) that is going
    /// to be used both for VRAM and OAM reading/writing and to
    /// forward some of the access operations.
    ppu: Ppu,

    /// Reference to the APU (Audio Processing Unit) that is going
    /// to be used both for register reading/writing and to
    /// forward some of the access operations.
    apu: Apu,

    /// Reference to the DMA controller holding the OAM DMA
    /// register state.
    dma: Dma,

    /// Reference to the joypad structure that is going to control
    /// the I/O access to this device.
    pad: Pad,

    /// The timer controller to be used as part of the I/O access
    /// that is memory mapped.
    timer: Timer,

    /// The serial data transfer controller to be used to control
    /// the link cable connection, this component is memory mapped.
    serial: Serial,

    /// The cartridge ROM that is currently loaded into the system,
    /// going to be used to access ROM and external RAM banks.
    rom: Cartridge,

    /// Working RAM of the system, echoed over 0xE000-0xFDFF.
    wram: [u8; WRAM_SIZE],

    /// High RAM memory that should provide extra speed for regular
    /// operations.
    hram: [u8; HRAM_SIZE],

    /// Backing storage for the 0xFEA0-0xFEFF unusable area, reads
    /// return whatever was last stored there.
    unused: [u8; UNUSED_SIZE],
}

impl Mmu {
    pub fn new(components: Components) -> Self {
        Self {
            ppu: components.ppu,
            apu: components.apu,
            dma: components.dma,
            pad: components.pad,
            timer: components.timer,
            serial: components.serial,
            rom: Cartridge::default(),
            wram: [0u8; WRAM_SIZE],
            hram: [0u8; HRAM_SIZE],
            unused: [0u8; UNUSED_SIZE],
            ie: 0x0,
        }
    }

    pub fn reset(&mut self) {
        self.rom = Cartridge::default();
        self.wram = [0u8; WRAM_SIZE];
        self.hram = [0u8; HRAM_SIZE];
        self.unused = [0u8; UNUSED_SIZE];
        self.ie = 0x0;
    }

    /// Advances the memory mapped peripherals that tick with the
    /// master clock (timer and serial).
    pub fn clock(&mut self, cycles: u16) {
        self.timer.clock(cycles);
        self.serial.clock(cycles);
    }

    /// Runs the pending OAM DMA transfer, the 160 byte copy is
    /// performed in one go once the transfer window elapses.
    pub fn clock_dma(&mut self, cycles: u16) {
        if !self.dma.active() {
            return;
        }

        let remaining = self.dma.cycles().saturating_sub(cycles);
        if remaining == 0 {
            let source = (self.dma.value() as u16) << 8;
            for index in 0..160u16 {
                let byte = self.read(source + index);
                self.ppu.write(0xfe00 + index, byte);
            }
            self.dma.set_active(false);
        }
        self.dma.set_cycles(remaining);
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            // 0x0000-0x7FFF - ROM bank 0 + switchable ROM bank
            0x0000..=0x7fff => self.rom.read(addr),

            // 0x8000-0x9FFF - Graphics: VRAM (8 KB)
            0x8000..=0x9fff => self.ppu.read(addr),

            // 0xA000-0xBFFF - External RAM (8 KB)
            0xa000..=0xbfff => self.rom.read(addr),

            // 0xC000-0xDFFF - Working RAM (8 KB)
            0xc000..=0xdfff => self.wram[(addr & 0x1fff) as usize],

            // 0xE000-0xFDFF - Working RAM echo
            0xe000..=0xfdff => self.wram[(addr & 0x1fff) as usize],

            // 0xFE00-0xFE9F - Object attribute memory (OAM)
            0xfe00..=0xfe9f => self.ppu.read(addr),

            // 0xFEA0-0xFEFF - Not usable, open bus storage
            0xfea0..=0xfeff => self.unused[(addr - 0xfea0) as usize],

            // 0xFF00 - Joypad input
            P1_ADDR => self.pad.read(addr),

            // 0xFF01-0xFF02 - Serial data transfer
            0xff01..=0xff02 => self.serial.read(addr),

            // 0xFF04-0xFF07 - Timer and divider
            0xff04..=0xff07 => self.timer.read(addr),

            // 0xFF0F — IF: Interrupt flag, aggregated from the
            // per peripheral request flags
            IF_ADDR => {
                (if self.ppu.int_vblank() { 0x01 } else { 0x00 }
                    | if self.ppu.int_stat() { 0x02 } else { 0x00 }
                    | if self.timer.int_tima() { 0x04 } else { 0x00 }
                    | if self.serial.int_serial() { 0x08 } else { 0x00 }
                    | if self.pad.int_pad() { 0x10 } else { 0x00 })
                    | 0xe0
            }

            // 0xFF10-0xFF26 — Audio
            // 0xFF30-0xFF3F — Wave pattern RAM
            0xff10..=0xff26 | 0xff30..=0xff3f => self.apu.read(addr),

            // 0xFF40-0xFF45 - PPU registers
            // 0xFF47-0xFF4B - PPU registers
            0xff40..=0xff45 | 0xff47..=0xff4b => self.ppu.read(addr),

            // 0xFF46 — DMA: OAM DMA source address & start
            0xff46 => self.dma.read(addr),

            // 0xFF80-0xFFFE - High RAM (HRAM)
            0xff80..=0xfffe => self.hram[(addr & 0x007f) as usize],

            // 0xFFFF — IE: Interrupt enable
            0xffff => self.ie,

            addr => {
                warnln!("Reading from unknown location 0x{:04x}", addr);
                0xff
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // 0x0000-0x7FFF - MBC control writes
            0x0000..=0x7fff => self.rom.write(addr, value),

            // 0x8000-0x9FFF - Graphics: VRAM (8 KB)
            0x8000..=0x9fff => self.ppu.write(addr, value),

            // 0xA000-0xBFFF - External RAM (8 KB)
            0xa000..=0xbfff => self.rom.write(addr, value),

            // 0xC000-0xDFFF - Working RAM (8 KB)
            0xc000..=0xdfff => self.wram[(addr & 0x1fff) as usize] = value,

            // 0xE000-0xFDFF - Working RAM echo
            0xe000..=0xfdff => self.wram[(addr & 0x1fff) as usize] = value,

            // 0xFE00-0xFE9F - Object attribute memory (OAM)
            0xfe00..=0xfe9f => self.ppu.write(addr, value),

            // 0xFEA0-0xFEFF - Not usable, open bus storage
            0xfea0..=0xfeff => self.unused[(addr - 0xfea0) as usize] = value,

            // 0xFF00 - Joypad input
            P1_ADDR => self.pad.write(addr, value),

            // 0xFF01-0xFF02 - Serial data transfer
            0xff01..=0xff02 => self.serial.write(addr, value),

            // 0xFF04-0xFF07 - Timer and divider
            0xff04..=0xff07 => self.timer.write(addr, value),

            // 0xFF0F — IF: Interrupt flag, distributed back into
            // the per peripheral request flags
            IF_ADDR => {
                self.ppu.set_int_vblank(value & 0x01 == 0x01);
                self.ppu.set_int_stat(value & 0x02 == 0x02);
                self.timer.set_int_tima(value & 0x04 == 0x04);
                self.serial.set_int_serial(value & 0x08 == 0x08);
                self.pad.set_int_pad(value & 0x10 == 0x10);
            }

            // 0xFF10-0xFF26 — Audio
            // 0xFF30-0xFF3F — Wave pattern RAM
            0xff10..=0xff26 | 0xff30..=0xff3f => self.apu.write(addr, value),

            // 0xFF40-0xFF45 - PPU registers
            // 0xFF47-0xFF4B - PPU registers
            0xff40..=0xff45 | 0xff47..=0xff4b => self.ppu.write(addr, value),

            // 0xFF46 — DMA: OAM DMA source address & start
            0xff46 => self.dma.write(addr, value),

            // 0xFF80-0xFFFE - High RAM (HRAM)
            0xff80..=0xfffe => self.hram[(addr & 0x007f) as usize] = value,

            // 0xFFFF — IE: Interrupt enable
            0xffff => self.ie = value,

            addr => warnln!("Writing to unknown location 0x{:04x}", addr),
        }
    }

    pub fn read_many(&self, addr: u16, count: u16) -> Vec<u8> {
        (0..count)
            .map(|offset| self.read(addr.wrapping_add(offset)))
            .collect()
    }

    pub fn write_many(&mut self, addr: u16, data: &[u8]) {
        for (index, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(index as u16), *byte)
        }
    }

    pub fn ppu(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn ppu_i(&self) -> &Ppu {
        &self.ppu
    }

    pub fn apu(&mut self) -> &mut Apu {
        &mut self.apu
    }

    pub fn apu_i(&self) -> &Apu {
        &self.apu
    }

    pub fn dma(&mut self) -> &mut Dma {
        &mut self.dma
    }

    pub fn dma_i(&self) -> &Dma {
        &self.dma
    }

    pub fn pad(&mut self) -> &mut Pad {
        &mut self.pad
    }

    pub fn pad_i(&self) -> &Pad {
        &self.pad
    }

    pub fn timer(&mut self) -> &mut Timer {
        &mut self.timer
    }

    pub fn timer_i(&self) -> &Timer {
        &self.timer
    }

    pub fn serial(&mut self) -> &mut Serial {
        &mut self.serial
    }

    pub fn serial_i(&self) -> &Serial {
        &self.serial
    }

    pub fn rom(&mut self) -> &mut Cartridge {
        &mut self.rom
    }

    pub fn rom_i(&self) -> &Cartridge {
        &self.rom
    }

    pub fn set_rom(&mut self, rom: Cartridge) {
        self.rom = rom;
    }
}

impl Default for Mmu {
    fn default() -> Self {
        let components = Components {
            ppu: Ppu::default(),
            apu: Apu::default(),
            dma: Dma::default(),
            pad: Pad::default(),
            timer: Timer::default(),
            serial: Serial::default(),
        };
        Mmu::new(components)
    }
}

#[cfg(test)]
mod tests {
    use crate::consts::{DMA_ADDR, IE_ADDR, IF_ADDR};

    use super::{BusComponent, Mmu};

    #[test]
    fn test_wram_identity_and_echo() {
        let mut mmu = Mmu::default();
        mmu.write(0xc123, 0x42);
        assert_eq!(mmu.read(0xc123), 0x42);
        assert_eq!(mmu.read(0xe123), 0x42);

        mmu.write(0xe234, 0x24);
        assert_eq!(mmu.read(0xc234), 0x24);
    }

    #[test]
    fn test_hram_identity() {
        let mut mmu = Mmu::default();
        for addr in 0xff80..0xffffu16 {
            mmu.write(addr, addr as u8);
        }
        for addr in 0xff80..0xffffu16 {
            assert_eq!(mmu.read(addr), addr as u8);
        }
    }

    #[test]
    fn test_unused_region_stores() {
        let mut mmu = Mmu::default();
        mmu.write(0xfea0, 0x12);
        mmu.write(0xfeff, 0x34);
        assert_eq!(mmu.read(0xfea0), 0x12);
        assert_eq!(mmu.read(0xfeff), 0x34);
    }

    #[test]
    fn test_ie_register() {
        let mut mmu = Mmu::default();
        mmu.write(IE_ADDR, 0x1f);
        assert_eq!(mmu.read(IE_ADDR), 0x1f);
        assert_eq!(mmu.ie, 0x1f);
    }

    #[test]
    fn test_if_upper_bits_read_ones() {
        let mut mmu = Mmu::default();
        assert_eq!(mmu.read(IF_ADDR), 0xe0);
        mmu.write(IF_ADDR, 0x05);
        assert_eq!(mmu.read(IF_ADDR), 0xe5);
    }

    #[test]
    fn test_if_routes_to_peripherals() {
        let mut mmu = Mmu::default();
        mmu.write(IF_ADDR, 0x04);
        assert!(mmu.timer_i().int_tima());
        mmu.write(IF_ADDR, 0x00);
        assert!(!mmu.timer_i().int_tima());
    }

    #[test]
    fn test_oam_dma_from_wram() {
        let mut mmu = Mmu::default();
        for index in 0..160u16 {
            mmu.write(0xc000 + index, index as u8);
        }
        mmu.write(DMA_ADDR, 0xc0);
        assert!(mmu.dma_i().active());

        mmu.clock_dma(640);
        assert!(!mmu.dma_i().active());
        for index in 0..160u16 {
            assert_eq!(mmu.read(0xfe00 + index), index as u8);
        }
    }

    #[test]
    fn test_clock_advances_timer() {
        let mut mmu = Mmu::default();
        mmu.write(0xff07, 0x05);
        mmu.clock(16);
        assert_eq!(mmu.read(0xff05), 0x01);
    }

    #[test]
    fn test_rom_read_without_cartridge() {
        let mmu = Mmu::default();
        assert_eq!(mmu.read(0x0000), 0xff);
        assert_eq!(mmu.read(0x4000), 0xff);
    }

    #[test]
    fn test_bus_component_dispatch() {
        let mut mmu = Mmu::default();
        let timer: &mut dyn BusComponent = mmu.timer();
        timer.write(0xff06, 0x42);
        assert_eq!(timer.read(0xff06), 0x42);
    }
}

//! Descriptor chains
//!
//! A chain is a circular array of uniform descriptor records owned by one
//! gateway agent. The last slot is always a fixed link back to slot 0, so an
//! `N`-slot chain carries `N - 1` data slots. Receive chains have a packet
//! buffer bound to every slot before formatting; transmit chains own no
//! buffers.
//!
//! Formatting writes the initial records, mirrors a link to the chain into
//! the switch-wide base descriptor table and programs the chain's `GWDCC`
//! register. DMA is not started by formatting.

use embedded_hal::delay::DelayNs;

use crate::dma::addr::PhysAddr;
use crate::dma::descriptor::bits::dt;
use crate::dma::descriptor::{
    DescriptorHeader, DmaDescriptor, ExtDescriptor, ExtTsDescriptor, Timestamp,
};
use crate::dma::table::BaseDescriptorTable;
use crate::driver::error::{DmaError, DmaResult, Result};
use crate::hal::bus::{RegisterAccess, RegisterBus};
use crate::internal::constants::{MIN_RING_SIZE, PKT_BUF_SZ};
use crate::internal::register::gwca::{GWDCC_BALR, GWDCC_DQT, GWDCC_EDE, GWDCC_ETS, gwdcc};

/// Direction of a chain, seen from the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Frames from the switch to memory
    Rx,
    /// Frames from memory to the switch
    Tx,
}

/// Record layout of a chain, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingLayout {
    /// Extended records (16 bytes)
    Plain,
    /// Extended records with a hardware timestamp (24 bytes)
    Timestamped,
}

impl RingLayout {
    /// Size of one slot in bytes
    pub const fn slot_size(self) -> usize {
        match self {
            RingLayout::Plain => <ExtDescriptor as DmaDescriptor>::SIZE,
            RingLayout::Timestamped => <ExtTsDescriptor as DmaDescriptor>::SIZE,
        }
    }
}

// =============================================================================
// Backing storage
// =============================================================================

/// Backing array of a chain, tagged with its layout
#[allow(clippy::large_enum_variant)]
pub enum ChainRing<const N: usize> {
    /// Plain extended records
    Plain([ExtDescriptor; N]),
    /// Timestamped extended records
    Timestamped([ExtTsDescriptor; N]),
}

impl<const N: usize> ChainRing<N> {
    /// Create zeroed storage for `layout`
    pub const fn new(layout: RingLayout) -> Self {
        match layout {
            RingLayout::Plain => Self::Plain([const { ExtDescriptor::new() }; N]),
            RingLayout::Timestamped => Self::Timestamped([const { ExtTsDescriptor::new() }; N]),
        }
    }

    /// Layout of the records
    pub const fn layout(&self) -> RingLayout {
        match self {
            Self::Plain(_) => RingLayout::Plain,
            Self::Timestamped(_) => RingLayout::Timestamped,
        }
    }

    /// Header of `slot`
    pub fn header(&self, slot: usize) -> Option<&DescriptorHeader> {
        match self {
            Self::Plain(records) => records.get(slot).map(|r| r.header()),
            Self::Timestamped(records) => records.get(slot).map(|r| r.header()),
        }
    }

    /// Hardware timestamp of `slot` (timestamped layout only)
    pub fn timestamp(&self, slot: usize) -> Option<Timestamp> {
        match self {
            Self::Plain(_) => None,
            Self::Timestamped(records) => records.get(slot).map(ExtTsDescriptor::timestamp),
        }
    }

    /// CPU address of slot 0
    pub fn as_ptr(&self) -> *const u8 {
        match self {
            Self::Plain(records) => records.as_ptr().cast(),
            Self::Timestamped(records) => records.as_ptr().cast(),
        }
    }

    fn clear(&self) {
        match self {
            Self::Plain(records) => records.iter().for_each(|r| r.clear()),
            Self::Timestamped(records) => records.iter().for_each(|r| r.clear()),
        }
    }
}

// =============================================================================
// Chain
// =============================================================================

/// One descriptor chain of a gateway agent
pub struct Chain<const N: usize> {
    index: u8,
    direction: Direction,
    ring: ChainRing<N>,
    buffers: [Option<PhysAddr>; N],
    submit: usize,
    reclaim: usize,
    formatted: bool,
}

impl<const N: usize> Chain<N> {
    /// Create an unformatted chain
    pub const fn new(index: u8, direction: Direction, layout: RingLayout) -> Self {
        Self {
            index,
            direction,
            ring: ChainRing::new(layout),
            buffers: [None; N],
            submit: 0,
            reclaim: 0,
            formatted: false,
        }
    }

    /// Chain index (base descriptor table slot and `GWDCC` register)
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Chain direction
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Record layout
    pub const fn layout(&self) -> RingLayout {
        self.ring.layout()
    }

    /// Total slots, including the terminating link
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the chain has no slots at all
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Slots that carry frames
    pub const fn data_slots(&self) -> usize {
        N.saturating_sub(1)
    }

    /// Whether [`Chain::format`] has completed
    pub const fn is_formatted(&self) -> bool {
        self.formatted
    }

    /// Backing records
    pub fn ring(&self) -> &ChainRing<N> {
        &self.ring
    }

    /// Header of `slot`
    pub fn slot(&self, slot: usize) -> Option<&DescriptorHeader> {
        self.ring.header(slot)
    }

    /// Bind a packet buffer at bus address `addr` to `slot`
    pub fn bind_buffer(&mut self, slot: usize, addr: PhysAddr) -> DmaResult<()> {
        if self.direction != Direction::Rx {
            return Err(DmaError::NotReceiveChain);
        }
        let entry = self.buffers.get_mut(slot).ok_or(DmaError::SlotOutOfRange)?;
        *entry = Some(addr);
        Ok(())
    }

    /// Buffer bound to `slot`
    pub fn buffer(&self, slot: usize) -> Option<PhysAddr> {
        self.buffers.get(slot).copied().flatten()
    }

    /// Whether every slot has a buffer
    pub fn is_fully_bound(&self) -> bool {
        self.buffers.iter().all(Option::is_some)
    }

    /// `GWDCC` value for this chain
    pub const fn control_bits(&self) -> u32 {
        let mut bits = GWDCC_BALR | GWDCC_EDE;
        if matches!(self.direction, Direction::Tx) {
            bits |= GWDCC_DQT;
        }
        if matches!(self.ring.layout(), RingLayout::Timestamped) {
            bits |= GWDCC_ETS;
        }
        bits
    }

    /// Bus address of slot 0
    pub fn base_address<R: RegisterAccess, D: DelayNs>(&self, bus: &RegisterBus<R, D>) -> PhysAddr {
        bus.bus_address(self.ring.as_ptr())
    }

    /// Lay out the chain's initial records and publish it to the hardware
    ///
    /// - Receive data slots: size [`PKT_BUF_SZ`], the bound buffer, type
    ///   `FEMPTY | DIE`.
    /// - Transmit data slots: type `EEMPTY | DIE`.
    /// - Last slot: `LINKFIX` to slot 0.
    /// - Base table entry `index`: `LINKFIX` to slot 0.
    /// - `GWDCC(index)`: [`Chain::control_bits`].
    ///
    /// Preconditions are checked before anything is written.
    pub fn format<R: RegisterAccess, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<R, D>,
        table: &BaseDescriptorTable,
        gwca_base: usize,
    ) -> Result<()> {
        if N < MIN_RING_SIZE {
            return Err(DmaError::RingTooSmall.into());
        }
        if usize::from(self.index) >= table.len() {
            return Err(DmaError::ChainIndexOutOfRange.into());
        }
        let base = self.base_address(bus);
        if !base.fits_descriptor() {
            return Err(DmaError::AddressOutOfRange.into());
        }
        if self.direction == Direction::Rx {
            for buffer in &self.buffers {
                match buffer {
                    None => return Err(DmaError::BufferNotBound.into()),
                    Some(addr) if !addr.fits_descriptor() => {
                        return Err(DmaError::AddressOutOfRange.into());
                    }
                    Some(_) => {}
                }
            }
        }

        self.ring.clear();

        let link = N - 1;
        for slot in 0..link {
            let Some(header) = self.ring.header(slot) else {
                break;
            };
            match self.direction {
                Direction::Rx => {
                    header.set_info_ds(PKT_BUF_SZ as u16);
                    header.set_pointer(self.buffers[slot].unwrap_or(PhysAddr::NULL));
                    header.set_die_dt(dt::FEMPTY | dt::DIE);
                }
                Direction::Tx => {
                    header.set_die_dt(dt::EEMPTY | dt::DIE);
                }
            }
        }

        if let Some(header) = self.ring.header(link) {
            header.set_pointer(base);
            header.set_die_dt(dt::LINKFIX);
        }

        table.link(self.index, base)?;
        bus.write(gwca_base + gwdcc(self.index), self.control_bits());

        self.submit = 0;
        self.reclaim = 0;
        self.formatted = true;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "chain {} formatted: {} slots, {}",
            self.index,
            N,
            self.direction
        );

        Ok(())
    }

    /// Next slot the producer fills
    pub const fn submit_cursor(&self) -> usize {
        self.submit
    }

    /// Next slot the consumer drains
    pub const fn reclaim_cursor(&self) -> usize {
        self.reclaim
    }

    /// Move the producer cursor to the next data slot
    pub fn advance_submit(&mut self) {
        self.submit = self.next_data_slot(self.submit);
    }

    /// Move the consumer cursor to the next data slot
    pub fn advance_reclaim(&mut self) {
        self.reclaim = self.next_data_slot(self.reclaim);
    }

    fn next_data_slot(&self, slot: usize) -> usize {
        match self.data_slots() {
            0 => 0,
            n => (slot + 1) % n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dma::descriptor::bits::DescriptorType;
    use crate::driver::error::Error;
    use crate::testing::{MockDelay, MockRegisters};

    const GWCA: usize = 0x1_0000;

    fn bus() -> RegisterBus<MockRegisters, MockDelay> {
        RegisterBus::new(MockRegisters::new(), MockDelay::new())
    }

    fn bind_all<const N: usize>(chain: &mut Chain<N>, first: u64) {
        for slot in 0..N {
            chain
                .bind_buffer(slot, PhysAddr::new(first + slot as u64 * 0x700))
                .unwrap();
        }
    }

    #[test]
    fn slot_sizes() {
        assert_eq!(RingLayout::Plain.slot_size(), 16);
        assert_eq!(
            RingLayout::Timestamped.slot_size(),
            RingLayout::Plain.slot_size() + 8
        );
    }

    #[test]
    fn four_slot_transmit_chain() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<4> = Chain::new(1, Direction::Tx, RingLayout::Plain);

        chain.format(&mut bus, &table, GWCA).unwrap();

        let base = chain.base_address(&bus);
        for slot in 0..3 {
            assert_eq!(chain.slot(slot).unwrap().die_dt(), dt::EEMPTY | dt::DIE);
        }
        let link = chain.slot(3).unwrap();
        assert_eq!(link.die_dt(), dt::LINKFIX);
        assert_eq!(link.pointer(), base);
        assert_eq!(table.entry(1).unwrap().descriptor_type(), DescriptorType::LinkFix);
        assert_eq!(table.entry(1).unwrap().pointer(), base);
    }

    #[test]
    fn receive_slots_carry_bound_buffers() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<8> = Chain::new(0, Direction::Rx, RingLayout::Timestamped);
        bind_all(&mut chain, 0x40_0000);

        chain.format(&mut bus, &table, GWCA).unwrap();

        for slot in 0..chain.data_slots() {
            let header = chain.slot(slot).unwrap();
            assert_eq!(header.pointer(), chain.buffer(slot).unwrap());
            assert_eq!(header.info_ds(), 1584);
            assert_eq!(header.die_dt(), dt::FEMPTY | dt::DIE);
        }
        assert!(chain.slot(7).unwrap().descriptor_type().is_link());
    }

    #[test]
    fn n_slot_chain_has_one_link() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<32> = Chain::new(1, Direction::Tx, RingLayout::Timestamped);
        chain.format(&mut bus, &table, GWCA).unwrap();

        let links = (0..chain.len())
            .filter(|slot| chain.slot(*slot).unwrap().descriptor_type().is_link())
            .count();
        assert_eq!(links, 1);
        assert_eq!(chain.data_slots(), 31);
        assert_eq!(chain.slot(31).unwrap().pointer(), chain.base_address(&bus));
    }

    #[test]
    fn control_register_bits() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();

        let mut rx: Chain<2> = Chain::new(0, Direction::Rx, RingLayout::Timestamped);
        bind_all(&mut rx, 0x1000);
        rx.format(&mut bus, &table, GWCA).unwrap();
        let mut tx: Chain<2> = Chain::new(1, Direction::Tx, RingLayout::Plain);
        tx.format(&mut bus, &table, GWCA).unwrap();

        assert_eq!(
            bus.regs().writes_to(GWCA + gwdcc(0)),
            [GWDCC_BALR | GWDCC_EDE | GWDCC_ETS]
        );
        assert_eq!(
            bus.regs().writes_to(GWCA + gwdcc(1)),
            [GWDCC_BALR | GWDCC_EDE | GWDCC_DQT]
        );
    }

    #[test]
    fn unbound_receive_chain_is_rejected_untouched() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<4> = Chain::new(0, Direction::Rx, RingLayout::Plain);
        chain.bind_buffer(0, PhysAddr::new(0x1000)).unwrap();

        assert_eq!(
            chain.format(&mut bus, &table, GWCA),
            Err(Error::Dma(DmaError::BufferNotBound))
        );
        assert!(bus.regs().writes().is_empty());
        assert!(!chain.is_formatted());
        assert_eq!(table.entry(0).unwrap().die_dt(), dt::EOS);
    }

    #[test]
    fn single_slot_chain_is_too_small() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<1> = Chain::new(1, Direction::Tx, RingLayout::Plain);
        assert_eq!(
            chain.format(&mut bus, &table, GWCA),
            Err(Error::Dma(DmaError::RingTooSmall))
        );
    }

    #[test]
    fn chain_index_must_fit_base_table() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<4> = Chain::new(6, Direction::Tx, RingLayout::Plain);
        assert_eq!(
            chain.format(&mut bus, &table, GWCA),
            Err(Error::Dma(DmaError::ChainIndexOutOfRange))
        );
    }

    #[test]
    fn wide_buffer_address_is_rejected() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<2> = Chain::new(0, Direction::Rx, RingLayout::Plain);
        chain.bind_buffer(0, PhysAddr::new(0x1000)).unwrap();
        chain.bind_buffer(1, PhysAddr::new(1 << 40)).unwrap();
        assert_eq!(
            chain.format(&mut bus, &table, GWCA),
            Err(Error::Dma(DmaError::AddressOutOfRange))
        );
    }

    #[test]
    fn transmit_chains_own_no_buffers() {
        let mut chain: Chain<4> = Chain::new(1, Direction::Tx, RingLayout::Plain);
        assert_eq!(
            chain.bind_buffer(0, PhysAddr::new(0x1000)),
            Err(DmaError::NotReceiveChain)
        );
        let mut rx: Chain<4> = Chain::new(0, Direction::Rx, RingLayout::Plain);
        assert_eq!(
            rx.bind_buffer(4, PhysAddr::new(0x1000)),
            Err(DmaError::SlotOutOfRange)
        );
    }

    #[test]
    fn cursors_wrap_over_data_slots() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<4> = Chain::new(1, Direction::Tx, RingLayout::Plain);
        chain.advance_submit();
        chain.format(&mut bus, &table, GWCA).unwrap();
        assert_eq!(chain.submit_cursor(), 0);

        for _ in 0..3 {
            chain.advance_submit();
        }
        assert_eq!(chain.submit_cursor(), 0);
        chain.advance_reclaim();
        assert_eq!(chain.reclaim_cursor(), 1);
        assert_eq!(chain.submit_cursor(), 0);
    }

    #[test]
    fn reformat_rewrites_stale_records() {
        let mut bus = bus();
        let table = BaseDescriptorTable::new();
        let mut chain: Chain<4> = Chain::new(1, Direction::Tx, RingLayout::Timestamped);
        chain.format(&mut bus, &table, GWCA).unwrap();
        chain.slot(0).unwrap().set_die_dt(dt::FSINGLE);
        chain.format(&mut bus, &table, GWCA).unwrap();
        assert_eq!(chain.slot(0).unwrap().die_dt(), dt::EEMPTY | dt::DIE);
        assert_eq!(chain.ring().timestamp(0), Some(Timestamp::default()));
    }
}

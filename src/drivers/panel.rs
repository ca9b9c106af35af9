//! ST7789 240×240 SPI panel.
//!
//! Generic over the `embedded-hal` 1.0 SPI device and pin traits so the
//! same driver runs on the esp-idf-hal SPI master and on host test mocks.
//! Implements [`DrawTarget`] directly; the renderer streams whole field
//! rows through [`fill_contiguous`](DrawTarget::fill_contiguous), which
//! becomes one address window plus one RAM write.
//!
//! Pixel format is RGB565, big-endian on the wire.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use log::info;

use crate::error::HwError;

mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// 16 bits per pixel.
const COLMOD_RGB565: u8 = 0x55;
/// Row/column order matching the badge's mounting, RGB element order.
const MADCTL_DEFAULT: u8 = 0x00;
/// `ESP_FAIL`, reported when the bus itself errors during bring-up.
const BUS_FAULT: i32 = -1;
/// Pixels buffered per SPI transaction.
const CHUNK_PIXELS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError {
    Spi,
    Pin,
}

impl From<PanelError> for HwError {
    fn from(_: PanelError) -> Self {
        HwError::DisplayInitFailed(BUS_FAULT)
    }
}

pub struct Panel<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    size: Size,
}

impl<SPI, DC, RST> Panel<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, width: u32, height: u32) -> Self {
        Self {
            spi,
            dc,
            rst,
            size: Size::new(width, height),
        }
    }

    /// Hardware reset plus the power-on command sequence.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), HwError> {
        self.rst.set_low().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(|_| PanelError::Pin)?;
        delay.delay_ms(120);

        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(10);
        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        self.command(cmd::MADCTL, &[MADCTL_DEFAULT])?;
        self.command(cmd::INVON, &[])?;
        self.command(cmd::NORON, &[])?;
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(10);

        info!("panel: ST7789 {}x{} ready", self.size.width, self.size.height);
        Ok(())
    }

    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }

    fn command(&mut self, op: u8, params: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Pin)?;
        self.spi.write(&[op]).map_err(|_| PanelError::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| PanelError::Pin)?;
            self.spi.write(params).map_err(|_| PanelError::Spi)?;
        }
        Ok(())
    }

    /// Open an inclusive address window and start a RAM write.
    fn window(&mut self, area: &Rectangle) -> Result<(), PanelError> {
        let Some(br) = area.bottom_right() else {
            return Ok(());
        };
        let (x0, y0) = (area.top_left.x as u16, area.top_left.y as u16);
        let (x1, y1) = (br.x as u16, br.y as u16);
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::RASET, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::RAMWR, &[])?;
        self.dc.set_high().map_err(|_| PanelError::Pin)
    }

    fn stream(&mut self, colors: impl IntoIterator<Item = Rgb565>) -> Result<(), PanelError> {
        let mut buf = [0u8; CHUNK_PIXELS * 2];
        let mut n = 0;
        for c in colors {
            let [hi, lo] = RawU16::from(c).into_inner().to_be_bytes();
            buf[n] = hi;
            buf[n + 1] = lo;
            n += 2;
            if n == buf.len() {
                self.spi.write(&buf).map_err(|_| PanelError::Spi)?;
                n = 0;
            }
        }
        if n > 0 {
            self.spi.write(&buf[..n]).map_err(|_| PanelError::Spi)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size)
    }
}

impl<SPI, DC, RST> OriginDimensions for Panel<SPI, DC, RST> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<SPI, DC, RST> DrawTarget for Panel<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = PanelError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounds();
        for Pixel(p, c) in pixels {
            if bounds.contains(p) {
                self.window(&Rectangle::new(p, Size::new(1, 1)))?;
                self.stream([c])?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let clipped = area.intersection(&self.bounds());
        if clipped.size == Size::zero() {
            return Ok(());
        }
        if clipped == *area {
            self.window(area)?;
            return self.stream(colors);
        }
        // Partially off-screen: fall back to per-pixel writes.
        self.draw_iter(
            area.points()
                .zip(colors)
                .map(|(p, c)| Pixel(p, c)),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounds());
        if clipped.size == Size::zero() {
            return Ok(());
        }
        self.window(&clipped)?;
        let count = clipped.size.width as usize * clipped.size.height as usize;
        self.stream(core::iter::repeat_n(color, count))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounds(), color)
    }
}

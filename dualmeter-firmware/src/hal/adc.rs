use avr_device::atmega128::ADC;

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcChannel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
    Adc6 = 6,
    Adc7 = 7,
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcReference {
    Aref = 0,          // External AREF
    Avcc = 1,          // AVCC with external cap at AREF
    Internal2_56V = 3, // Internal reference with external cap at AREF
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcPrescaler {
    Div2 = 0,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

// ADCSRA bit positions
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const ADFR: u8 = 1 << 5;
const ADIE: u8 = 1 << 3;

pub struct Adc {
    _private: (),
}

impl Adc {
    /// Enable the converter with the given clock divider and reference.
    pub fn new(prescaler: AdcPrescaler, reference: AdcReference) -> Self {
        unsafe {
            let p = ADC::ptr();
            (*p).adcsra.write(|w| w.bits(ADEN | (prescaler as u8)));
            (*p).admux.write(|w| w.bits((reference as u8) << 6));
        }
        Self { _private: () }
    }

    pub fn select_channel(&mut self, channel: AdcChannel) {
        unsafe {
            (*ADC::ptr())
                .admux
                .modify(|r, w| w.bits((r.bits() & 0xE0) | (channel as u8)));
        }
    }

    /// Continuous conversions with a data-ready interrupt after each one.
    pub fn start_free_running(&mut self) {
        unsafe {
            (*ADC::ptr())
                .adcsra
                .modify(|r, w| w.bits(r.bits() | ADFR | ADIE | ADSC));
        }
    }

    /// Kick off a single conversion.
    pub fn start_conversion(&mut self) {
        unsafe {
            (*ADC::ptr()).adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
        }
    }

    /// True once the current conversion has finished.
    pub fn conversion_done(&self) -> bool {
        unsafe { (*ADC::ptr()).adcsra.read().bits() & ADSC == 0 }
    }

    /// Raw data register contents, low byte read first.
    pub fn read_data(&mut self) -> u16 {
        unsafe {
            let p = ADC::ptr();
            let low = (*p).adcl.read().bits() as u16;
            let high = (*p).adch.read().bits() as u16;
            (high << 8) | low
        }
    }
}

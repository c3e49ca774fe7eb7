#![no_std]
#![no_main]

use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;
use panic_halt as _;
use systime::{DivStrategy, SysTime, SysTimeConfig, TimerSource};

// SysTick reload value: full 24-bit range
const SYST_RELOAD: u32 = 0x00FF_FFFF;

// SysTick counts down; present it as a 24-bit up-counter
struct SysTickSource;

impl TimerSource for SysTickSource {
    fn read(&mut self) -> u32 {
        SYST_RELOAD - SYST::get_current()
    }
}

#[cfg(feature = "subtract")]
const STRATEGY: DivStrategy = DivStrategy::Subtract;

#[cfg(not(feature = "subtract"))]
const STRATEGY: DivStrategy = DivStrategy::Divide;

// 8 MHz core clock straight into SysTick
const CONFIG: SysTimeConfig = SysTimeConfig::new(24, 1, 8_000).with_strategy(STRATEGY);

// Entry point
#[cortex_m_rt::entry]
fn main() -> ! {
    let Some(mut cp) = cortex_m::Peripherals::take() else {
        loop {
            cortex_m::asm::nop();
        }
    };
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(SYST_RELOAD);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();

    let Ok(mut clock) = SysTime::new(SysTickSource, CONFIG) else {
        loop {
            cortex_m::asm::nop();
        }
    };

    // Touch every public path so the optimizer keeps it
    // Use black_box to prevent optimizer from removing the code
    let start = core::hint::black_box(clock.current());
    clock.set(core::hint::black_box(1_700_000_000));
    clock.adjust(core::hint::black_box(-1));

    // Poll well inside the 2.1 s SysTick period
    loop {
        let _ = core::hint::black_box(clock.ms_expired(start.ms, 500));
        let _ = core::hint::black_box(clock.last().since(&start));
        core::hint::black_box(&clock);
        cortex_m::asm::nop();
    }
}

// Required: exception handler
#[cortex_m_rt::exception]
unsafe fn HardFault(_ef: &cortex_m_rt::ExceptionFrame) -> ! {
    loop {
        cortex_m::asm::nop();
    }
}

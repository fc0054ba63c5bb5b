//! One-shot hardware peripheral initialization.
//!
//! Configures the LDR ADC channel, the transmit-trigger input and the
//! console UART baud rate using raw ESP-IDF sys calls.  Called once from `main()` before the loop starts.
//! The soft-serial TX pin is owned by an `esp-idf-hal` `PinDriver` and is
//! not touched here.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    ConsoleBaudFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::ConsoleBaudFailed(rc) => write!(f, "console UART baud change failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

/// ADC1 channel of the LDR divider.
pub const ADC1_CH_LDR: u32 = pins::LDR_ADC_CHANNEL;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_adc()?;
        init_trigger_input()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    // 12 dB attenuation spans the full divider range.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_LDR, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=LDR)", ADC1_CH_LDR);
    Ok(())
}

/// Raw 12-bit read.  A failed conversion reads as 0.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── Trigger input ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_trigger_input() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::TRIGGER_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_POSEDGE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    info!("hw_init: trigger input configured (GPIO{})", pins::TRIGGER_GPIO);
    Ok(())
}

// ── Console UART ──────────────────────────────────────────────

/// `ESP_ERR_INVALID_ARG`, mirrored for the simulation path.
#[cfg(not(target_os = "espidf"))]
const SIM_ERR_INVALID_ARG: i32 = 0x102;

#[cfg(not(target_os = "espidf"))]
static SIM_CONSOLE_BAUD: core::sync::atomic::AtomicU32 = core::sync::atomic::AtomicU32::new(115_200);

/// Reprogram the console UART divider to `baud`.  Pending output is
/// flushed first so the banner is not garbled mid-byte.
#[cfg(target_os = "espidf")]
pub fn set_console_baud(baud: u32) -> Result<(), HwInitError> {
    let port = CONFIG_ESP_CONSOLE_UART_NUM as uart_port_t;
    // SAFETY: the console UART has no installed driver; the divider write
    // is guarded by the HAL spinlock.  Called once from main() before the
    // loop.
    let ret = unsafe {
        esp_rom_uart_tx_wait_idle(CONFIG_ESP_CONSOLE_UART_NUM as _);
        uart_set_baudrate(port, baud)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::ConsoleBaudFailed(ret)); }

    info!("hw_init: console UART{} @ {} baud", CONFIG_ESP_CONSOLE_UART_NUM, baud);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn set_console_baud(baud: u32) -> Result<(), HwInitError> {
    if baud == 0 {
        return Err(HwInitError::ConsoleBaudFailed(SIM_ERR_INVALID_ARG));
    }
    SIM_CONSOLE_BAUD.store(baud, core::sync::atomic::Ordering::Relaxed);
    log::info!("hw_init(sim): console @ {} baud", baud);
    Ok(())
}

/// Baud rate the console UART runs at.
#[cfg(target_os = "espidf")]
pub fn console_baud() -> Option<u32> {
    let mut baud = 0u32;
    // SAFETY: read-only register access.
    let ret = unsafe { uart_get_baudrate(CONFIG_ESP_CONSOLE_UART_NUM as uart_port_t, &mut baud) };
    (ret == ESP_OK as i32).then_some(baud)
}

#[cfg(not(target_os = "espidf"))]
pub fn console_baud() -> Option<u32> {
    Some(SIM_CONSOLE_BAUD.load(core::sync::atomic::Ordering::Relaxed))
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::trigger::transmit_isr_handler;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn trigger_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_timer_get_time() } / 1_000) as u32;
    transmit_isr_handler(now_ms);
}

/// Install the per-pin GPIO ISR service and hook the trigger edge.
/// Call after init_peripherals() and before the loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The handler below only
    // touches the lock-free TransmitTrigger atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        gpio_set_intr_type(pins::TRIGGER_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE);
        let ret = gpio_isr_handler_add(pins::TRIGGER_GPIO, Some(trigger_gpio_isr), core::ptr::null_mut());
        if ret != ESP_OK {
            return Err(HwInitError::IsrInstallFailed(ret));
        }
        gpio_intr_enable(pins::TRIGGER_GPIO);
    }
    info!("hw_init: ISR service installed (trigger)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

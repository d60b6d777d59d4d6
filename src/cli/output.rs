use crate::core::dumpsys::power::PowerState;

pub fn print_power_state(state: &PowerState) {
    println!("  Wakefulness:      {}", state.wakefulness);
    println!("  Locked:           {}", if state.is_locked() { "yes" } else { "no" });
    println!("  Timeout override: {}", state.timeout_override);
}

pub fn print_success(message: &str) {
    println!(" {}", message);
}

use chrono::Utc;
use rand::Rng;

/// Short, human-quotable identifier: prefix + base36 timestamp + 4 random
/// base36 characters. Uniqueness is probabilistic, which is enough for a
/// reference printed on paperwork.
pub fn generate_tracking_id(prefix: &str) -> String {
    let timestamp = to_base36(Utc::now().timestamp_millis() as u64);
    let random = to_base36(rand::thread_rng().gen_range(0..36u64.pow(4)));
    format!("{}{}{:0>4}", prefix, timestamp, random)
}

/// Six-digit one-time code for email verification and password resets.
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

use rust_decimal::prelude::*;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at platform scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// 金额统一舍入：2 位小数，四舍五入 (half-up)
///
/// 所有价格计算内部使用 Decimal，落库/出参前经过这里。
pub fn round_money(value: f64) -> f64 {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Human-readable order number derived from a snowflake id: `MS-` + base36.
///
/// Unique by construction (the id is unique) and short enough for receipts.
pub fn order_number(id: i64) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut n = id.unsigned_abs();
    if n == 0 {
        return "MS-0".to_string();
    }
    let mut buf = Vec::with_capacity(11);
    while n > 0 {
        buf.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    format!("MS-{}", String::from_utf8(buf).expect("base36 is ascii"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_id_is_positive_and_unique_enough() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
        // Same millisecond collisions are possible but vanishingly rare
        // with 12 random bits; just check the ids look sane.
        assert!(a >> 12 > 0);
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(10.005), 10.01);
        assert_eq!(round_money(10.004), 10.0);
        assert_eq!(round_money(-0.005), -0.01);
    }

    #[test]
    fn test_order_number_format() {
        assert_eq!(order_number(35), "MS-Z");
        assert_eq!(order_number(36), "MS-10");
        assert!(order_number(snowflake_id()).starts_with("MS-"));
    }
}

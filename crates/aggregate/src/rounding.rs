/// Round `value` to `digits` decimal places, half away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.9662402868270874, 4), 0.9662);
        assert_eq!(round_to(0.9802322387695312, 5), 0.98023);
        assert_eq!(round_to(1.0, 4), 1.0);
        assert_eq!(round_to(0.123456, 0), 0.0);
    }
}

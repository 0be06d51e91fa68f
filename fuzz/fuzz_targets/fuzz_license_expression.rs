#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tools::model::LicenseExpression;

/// Fuzz the license expression parser. A parsed expression must print to
/// text that parses back to the same tree.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(expression) = s.parse::<LicenseExpression>() {
            let printed = expression.to_string();
            let reparsed: LicenseExpression = printed.parse().expect("printed expression parses");
            assert_eq!(reparsed, expression);
        }
    }
});

// Currency rendering in the en-US convention: prefix symbol, comma grouping,
// CLDR currency digits, half away from zero rounding.

const NO_BREAK_SPACE: char = '\u{a0}';

fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        "KRW" => "₩",
        "ILS" => "₪",
        "VND" => "₫",
        "PHP" => "₱",
        "CNY" => "CN¥",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "BRL" => "R$",
        "TWD" => "NT$",
        "XCD" => "EC$",
        "XAF" => "FCFA",
        "XOF" => "F\u{a0}CFA",
        "XPF" => "CFPF",
        _ => return None,
    };
    Some(symbol)
}

// CLDR currencyData digits, which is what en-US number formatting uses.
fn fraction_digits(code: &str) -> usize {
    match code {
        "ADP" | "AFN" | "ALL" | "BIF" | "BYR" | "CLP" | "DJF" | "ESP" | "GNF" | "IQD" | "IRR"
        | "ISK" | "ITL" | "JPY" | "KMF" | "KPW" | "KRW" | "LAK" | "LBP" | "LUF" | "MGA"
        | "MGF" | "MMK" | "PYG" | "RSD" | "RWF" | "SLL" | "SOS" | "STD" | "SYP" | "TMM"
        | "TRL" | "UGX" | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" | "YER" | "ZMK"
        | "ZWD" => 0,
        "BHD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        "CLF" | "UYW" => 4,
        _ => 2,
    }
}

fn is_iso_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Renders `amount` in `currency`, e.g. `$1,234.50`, `-€3.00` or `CHF 12.00`.
///
/// Never fails: a currency that is not a three letter code is used verbatim
/// as the prefix.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let currency = currency.trim();
    let (prefix, digits) = if is_iso_code(currency) {
        let code = currency.to_ascii_uppercase();
        let digits = fraction_digits(&code);
        match currency_symbol(&code) {
            Some(symbol) => (symbol.to_string(), digits),
            None => (format!("{code}{NO_BREAK_SPACE}"), digits),
        }
    } else {
        (format!("{currency}{NO_BREAK_SPACE}"), 2)
    };

    let sign = if amount.is_sign_negative() && !amount.is_nan() {
        "-"
    } else {
        ""
    };

    let number = if amount.is_nan() {
        "NaN".to_string()
    } else if amount.is_infinite() {
        "∞".to_string()
    } else {
        let fixed = round_half_expand(amount.abs(), digits);
        group_thousands(&fixed)
    };

    format!("{sign}{prefix}{number}")
}

// Rounds the shortest round-trip decimal of the value, so 1.005 reads as
// 1.005 and not as its binary expansion 1.00499...
fn round_half_expand(value: f64, digits: usize) -> String {
    let (int_part, frac_part) = shortest_decimal(value);
    let (int_part, frac_part) = (int_part.as_str(), frac_part.as_str());

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|next| *next >= b'5');
    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
            int_len += 1;
        }
    }

    let text: String = kept.iter().map(|d| char::from(b'0' + d)).collect();
    if digits == 0 {
        text
    } else {
        format!("{}.{}", &text[..int_len], &text[int_len..])
    }
}

/// Splits `value` into integer and fraction digits using the shortest
/// representation that parses back to the same f64.
fn shortest_decimal(value: f64) -> (String, String) {
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let significant: String = mantissa.chars().filter(|c| *c != '.').collect();

    let point = exponent + 1;
    if point <= 0 {
        let leading_zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{leading_zeros}{significant}"))
    } else if point as usize >= significant.len() {
        let trailing_zeros = "0".repeat(point as usize - significant.len());
        (format!("{significant}{trailing_zeros}"), String::new())
    } else {
        let (int_part, frac_part) = significant.split_at(point as usize);
        (int_part.to_string(), frac_part.to_string())
    }
}

fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed, None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

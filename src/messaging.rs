use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::receipt::STORE_NAME;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Local numbers here have at most 11 digits; longer ones already carry a country code.
const MAX_LOCAL_DIGITS: usize = 11;

pub fn phone_digits(contact: &str) -> String {
    contact.chars().filter(char::is_ascii_digit).collect()
}

pub fn greeting(customer_name: &str, order_id: i32, receipt_url: Option<&str>) -> String {
    match receipt_url {
        Some(url) => format!(
            "Olá {customer_name}! 🧾\nSegue seu comprovante de compra com a {STORE_NAME}:\n{url}\n\nAgradecemos pela preferência! 💙"
        ),
        None => format!(
            "Olá {customer_name}! 🧾\nRecebemos seu pedido nº {order_id} na {STORE_NAME}.\n\nAgradecemos pela preferência! 💙"
        ),
    }
}

/// `wa.me` deep link pre-filled with the receipt greeting, or `None` when the
/// contact holds no digits to dial.
pub fn whatsapp_link(
    country_code: &str,
    contact: &str,
    customer_name: &str,
    order_id: i32,
    receipt_url: Option<&str>,
) -> Option<String> {
    let digits = phone_digits(contact);
    if digits.is_empty() {
        return None;
    }

    let number = if digits.len() > MAX_LOCAL_DIGITS && digits.starts_with(country_code) {
        digits
    } else {
        format!("{country_code}{digits}")
    };
    let message = greeting(customer_name, order_id, receipt_url);
    let text = utf8_percent_encode(&message, URI_COMPONENT);

    Some(format!("https://wa.me/{number}?text={text}"))
}

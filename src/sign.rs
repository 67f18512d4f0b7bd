use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `msg`, the signature Binance expects on signed endpoints.
pub fn signature(api_secret: &[u8], msg: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(api_secret)
        .expect("HMAC can take keys of any size");
    mac.update(msg.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use ndn_cert::cert::Certificate;
use ndn_cert::name::Name;

fuzz_target!(|data: &[u8]| {
    let (which, data) = match data.split_first() {
        Some((first, data)) => (*first, data),
        None => return,
    };

    match which % 2 {
        0 => {
            // Whatever decodes must encode to something that decodes to
            // the same certificate and encodes to the same octets.
            let content = Bytes::copy_from_slice(data);
            if let Ok(mut cert) = Certificate::decode(Name::new(), content) {
                let _ = cert.to_string();
                if let Ok(first) = cert.encode() {
                    let mut decoded = Certificate::decode(
                        Name::new(), first.clone()
                    ).expect("re-encoded certificate failed to decode");
                    assert_eq!(decoded, cert);
                    let second = decoded.encode().expect("encoding failed");
                    assert_eq!(first, second);
                }
            }
        }
        1 => {
            if let Ok(s) = std::str::from_utf8(data) {
                if let Ok(name) = s.parse::<Name>() {
                    let again = name.to_string().parse::<Name>().ok();
                    assert_eq!(again, Some(name));
                }
            }
        }
        _ => panic!("what?"),
    }
});

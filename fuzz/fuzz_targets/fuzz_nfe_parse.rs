#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — every input yields Parsed or Unparseable.
        let _ = lancamento::nfe::parse_xml(s, "fuzz.xml");
    }
});

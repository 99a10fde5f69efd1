#![no_main]

use libfuzzer_sys::fuzz_target;
use region_explorer::io::read_table_from_bytes;

fuzz_target!(|data: &[u8]| {
    let (Ok(with_header), Ok(body)) = (
        read_table_from_bytes(data, true),
        read_table_from_bytes(data, false),
    ) else {
        return;
    };

    // Dropping the header removes exactly the first row. Compared through
    // Debug so NaN cells count as equal.
    if with_header.is_empty() {
        assert!(body.is_empty());
    } else {
        assert_eq!(with_header.len(), body.len() + 1);
        assert_eq!(
            format!("{:?}", &with_header.rows[1..]),
            format!("{:?}", &body.rows[..])
        );
    }
});

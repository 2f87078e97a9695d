// SPDX-License-Identifier: GPL-2.0 OR MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use rnv::phys::{NvDecodeLimits, NvList, PoolLabel};

fuzz_target!(|data: &[u8]| {
    let limits = NvDecodeLimits {
        nv_list_arrays: true,
        ..NvDecodeLimits::default()
    };

    for limits in [NvDecodeLimits::default(), limits] {
        if let Ok(list) = NvList::from_bytes_with_limits(data, &limits) {
            // Dump and summary of any decoded list.
            let _ = list.to_string();
            let _ = PoolLabel::from_nv_list(&list);

            // Decoding is deterministic. Doubles may be NaN, so compare dumps.
            let again = NvList::from_bytes_with_limits(data, &limits).map(|v| format!("{v:?}"));
            assert_eq!(again.ok(), Some(format!("{list:?}")));
        }
    }
});

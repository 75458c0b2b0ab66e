use libsync_core::{FileCandidate, Verdict, evaluate};
use libsync_fs::NormalizedPath;
use proptest::prelude::*;
use std::time::{Duration, UNIX_EPOCH};

fn candidates(specs: &[(u8, u32)]) -> Vec<FileCandidate> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(content, mtime))| FileCandidate {
            path: NormalizedPath::new(format!("/copy/{}", i)),
            checksum: format!("h{}", content),
            modified: UNIX_EPOCH + Duration::from_secs(u64::from(mtime)),
            created: UNIX_EPOCH,
        })
        .collect()
}

proptest! {
    #[test]
    fn authoritative_is_first_latest(specs in prop::collection::vec((0u8..3, 0u32..5), 1..8)) {
        let group = candidates(&specs);
        match evaluate(&group) {
            Verdict::Consistent => {
                prop_assert!(group.iter().all(|c| c.checksum == group[0].checksum));
            }
            Verdict::Divergent(d) => {
                let latest = group.iter().map(|c| c.modified).max().unwrap();
                let first = group.iter().position(|c| c.modified == latest).unwrap();
                prop_assert_eq!(d.authoritative, first);
            }
        }
    }

    #[test]
    fn every_copy_is_classified_once(specs in prop::collection::vec((0u8..3, 0u32..5), 1..8)) {
        let group = candidates(&specs);
        if let Verdict::Divergent(d) = evaluate(&group) {
            let mut seen: Vec<usize> = d.obsolete.iter().map(|o| o.index).collect();
            seen.extend(&d.synced);
            seen.push(d.authoritative);
            seen.sort();
            prop_assert_eq!(seen, (0..group.len()).collect::<Vec<_>>());

            let latest = &group[d.authoritative].checksum;
            prop_assert!(!d.obsolete.is_empty());
            prop_assert!(d.obsolete.iter().all(|o| &group[o.index].checksum != latest));
            prop_assert!(d.synced.iter().all(|&i| &group[i].checksum == latest));
        }
    }
}

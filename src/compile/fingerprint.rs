use xxhash_rust::xxh3::Xxh3;

use crate::compile::layout::{LayoutSetting, SettingKind};

const XXH3_SEED: u64 = 0x6864_7270_7072_6566;

/// Preferences schema version for a setting list.
///
/// Covers identifiers, kinds and enum keys in order, so any change to the stored layout
/// yields a different value. Never 0, which marks "no version" in old preference blobs.
pub(crate) fn prefs_version(settings: &[LayoutSetting]) -> u32 {
    let mut h = StableHasher::new();
    h.write_u64(settings.len() as u64);
    for s in settings {
        h.write_str(&s.ident);
        write_kind(&mut h, &s.kind);
    }
    let v = h.finish();
    match (v as u32) ^ ((v >> 32) as u32) {
        0 => 1,
        x => x,
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> u64 {
        self.inner.digest()
    }
}

fn write_kind(h: &mut StableHasher, k: &SettingKind) {
    match k {
        SettingKind::Bool => h.write_u8(0),
        SettingKind::Int => h.write_u8(1),
        SettingKind::Float => h.write_u8(2),
        SettingKind::Token => h.write_u8(3),
        SettingKind::Enum { type_name, keys } => {
            h.write_u8(4);
            h.write_str(type_name);
            h.write_u64(keys.len() as u64);
            for key in keys {
                h.write_str(key);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;

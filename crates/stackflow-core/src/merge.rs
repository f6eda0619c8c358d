//! レイヤー設定のマージ

use serde_yaml::{Mapping, Value};

/// overlay を base に再帰的にマージした新しいマッピングを返す
///
/// - 両方がマッピングのキーは再帰的にマージ
/// - それ以外（スカラー、シーケンス、null）は overlay の値で丸ごと置き換え
/// - base のみにあるキーはそのまま残る
///
/// キーの順序は base の順序を保ち、新しいキーは overlay の順に末尾へ追加される。
pub fn deep_merge(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut out = base.clone();
    for (key, value) in overlay {
        let merged = match (out.get(key), value) {
            (Some(Value::Mapping(base_child)), Value::Mapping(overlay_child)) => {
                Value::Mapping(deep_merge(base_child, overlay_child))
            }
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

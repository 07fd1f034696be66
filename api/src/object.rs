use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use serde_json::Value;

/*
 * A cluster resource of any kind, as printed by `kubectl get ... -o json`.
 * Only the metadata is typed; the remainder of the document is carried
 * through untouched so it can be printed back out.
 */
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Object {
    pub metadata: ObjectMeta,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/*
 * The `kind: List` envelope kubectl wraps multi-item output in. kubectl
 * omits `items` entirely for some error paths, hence the default.
 */
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectList<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

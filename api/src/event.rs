use k8s_openapi::api::core::v1::Event;

/* Annotation the query controller attaches to events it records; its
 * value is the structured payload shown by the live watch. */
pub const EVENT_DATA_ANNOTATION: &str = "queryctl.dev/event-data";

/*
 * The payload carried by an event, if any. An event without the
 * annotation, or with an empty value, has nothing worth showing.
 */
pub fn event_data(event: &Event) -> Option<&str> {
    let annotations = event.metadata.annotations.as_ref()?;

    annotations
        .get(EVENT_DATA_ANNOTATION)
        .map(|payload| payload.as_str())
        .filter(|payload| !payload.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn annotated(entries: &[(&str, &str)]) -> Event {
        let mut annotations = BTreeMap::new();
        for (key, value) in entries {
            annotations.insert(key.to_string(), value.to_string());
        }

        Event {
            metadata: ObjectMeta {
                annotations: Some(annotations),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn payload_is_read_from_the_annotation() {
        let event = annotated(&[(EVENT_DATA_ANNOTATION, r#"{"phase":"running"}"#)]);
        assert_eq!(event_data(&event), Some(r#"{"phase":"running"}"#));
    }

    #[test]
    fn unrelated_annotations_are_ignored() {
        let event = annotated(&[("queryctl.dev/session-id", "abc123")]);
        assert_eq!(event_data(&event), None);
    }

    #[test]
    fn empty_payload_counts_as_absent() {
        let event = annotated(&[(EVENT_DATA_ANNOTATION, "")]);
        assert_eq!(event_data(&event), None);
    }

    #[test]
    fn bare_event_has_no_payload() {
        assert_eq!(event_data(&Event::default()), None);
    }
}

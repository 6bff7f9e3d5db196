//! Data mapping utilities for Jenkins responses

use std::collections::HashMap;

use serde_json::Value;

use crate::types::{
    self,
    Artifact,
    Job,
};

/// Renders a JSON leaf as text. Strings are kept verbatim, null or missing
/// fields become empty, anything else uses its JSON representation.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn job_entry_to_job(entry: types::JobEntry) -> Job {
    Job {
        name: value_to_string(&entry.name),
        url: value_to_string(&entry.url),
        color: value_to_string(&entry.color),
    }
}

/// Keys jobs by name; a repeated name keeps the last entry.
pub(crate) fn jobs_by_name(response: types::JobsResponse) -> HashMap<String, Job> {
    let mut jobs = HashMap::with_capacity(response.jobs.len());
    for entry in response.jobs {
        let job = job_entry_to_job(entry);
        jobs.insert(job.name.clone(), job);
    }
    jobs
}

pub(crate) fn artifact_entry_to_artifact(entry: types::ArtifactEntry) -> Artifact {
    Artifact {
        display_path: value_to_string(&entry.display_path),
        file_name: value_to_string(&entry.file_name),
        relative_path: value_to_string(&entry.relative_path),
    }
}

pub(crate) fn artifacts_in_order(response: types::ArtifactsResponse) -> Vec<Artifact> {
    response
        .artifacts
        .into_iter()
        .map(artifact_entry_to_artifact)
        .collect()
}

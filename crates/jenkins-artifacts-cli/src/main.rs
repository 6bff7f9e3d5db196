mod logging;

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use jenkins_artifacts::{
    Artifact,
    ClientConfig,
    JenkinsClient,
    Job,
};

const DEFAULT_BUILD: &str = "lastSuccessfulBuild";
const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

struct CliConfig {
    job: Option<String>,
    build: String,
    download_dir: PathBuf,
}

impl CliConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let job = lookup("JENKINS_JOB").filter(|s| !s.trim().is_empty());

        let build = lookup("JENKINS_BUILD")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BUILD.to_string());

        let download_dir = lookup("JENKINS_DOWNLOAD_DIR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_DIR.to_string())
            .into();

        Self {
            job,
            build,
            download_dir,
        }
    }
}

/// Keeps only the last component of a server supplied file name so a
/// download can never escape the target directory.
fn target_path(dir: &Path, file_name: &str) -> Option<PathBuf> {
    Path::new(file_name).file_name().map(|name| dir.join(name))
}

/// Pairs each artifact with its local path. Artifacts whose names cannot be
/// used, or that would land on a path already claimed, are skipped.
fn plan_targets<'a>(dir: &Path, artifacts: &'a [Artifact]) -> Vec<(&'a Artifact, PathBuf)> {
    let mut claimed = HashSet::new();
    let mut planned = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let Some(target) = target_path(dir, &artifact.file_name) else {
            tracing::warn!("Skipping artifact with unusable name {:?}", artifact.file_name);
            continue;
        };
        if !claimed.insert(target.clone()) {
            tracing::warn!(
                "Skipping {}: {} is already taken by another artifact",
                artifact.relative_path,
                target.display()
            );
            continue;
        }
        planned.push((artifact, target));
    }

    planned
}

async fn write_artifact(
    client: &JenkinsClient, job: &Job, build: &str, artifact: &Artifact, target: &Path,
) -> anyhow::Result<u64> {
    let stream = client
        .download_artifact(job, build, artifact)
        .await
        .with_context(|| format!("Failed to download {}", artifact.relative_path))?;

    if !stream.status().is_success() {
        anyhow::bail!(
            "Failed to download {}: server answered {}",
            artifact.relative_path,
            stream.status()
        );
    }

    let mut file = tokio::fs::File::create(target)
        .await
        .with_context(|| format!("Failed to create {}", target.display()))?;

    match stream.copy_to(&mut file).await {
        Ok(written) => Ok(written),
        Err(e) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(target).await {
                tracing::warn!("Could not remove partial {}: {}", target.display(), remove_err);
            }
            Err(anyhow::Error::new(e).context(format!("Failed to write {}", target.display())))
        }
    }
}

async fn list_jobs(client: &JenkinsClient) -> anyhow::Result<()> {
    let jobs = client
        .list_jobs()
        .await
        .with_context(|| format!("Failed to list jobs on {}", client.server_url()))?;

    let mut names: Vec<_> = jobs.keys().collect();
    names.sort();
    for name in names {
        let job = &jobs[name];
        println!("{}\t{}\t{}", job.name, job.color, job.url);
    }

    Ok(())
}

async fn download_build(
    client: &JenkinsClient, job: &Job, build: &str, dir: &Path,
) -> anyhow::Result<()> {
    let artifacts = client
        .list_artifacts(job, build)
        .await
        .with_context(|| format!("Failed to list artifacts of {} build {}", job.name, build))?;

    if artifacts.is_empty() {
        tracing::info!("{} build {} has no artifacts", job.name, build);
        return Ok(());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for (artifact, target) in plan_targets(dir, &artifacts) {
        tracing::info!("Downloading {} to {}", artifact.relative_path, target.display());
        let written = write_artifact(client, job, build, artifact, &target).await?;
        tracing::info!("Wrote {} bytes to {}", written, target.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let client_config = ClientConfig::from_env().context("Invalid Jenkins configuration")?;
    let cli_config = CliConfig::from_env();

    tracing::info!("Using Jenkins server {}", client_config.server_url);

    let client = JenkinsClient::from_config(client_config)?;

    match cli_config.job {
        Some(job) => {
            download_build(
                &client,
                &Job::named(job),
                &cli_config.build,
                &cli_config.download_dir,
            )
            .await
        }
        None => list_jobs(&client).await,
    }
}

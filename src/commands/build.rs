//! Generate static files

use anyhow::Result;

use crate::generator::{copy_static_assets, Generator};
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(&blog.config, blog.repository())?;
    let posts = generator.generate(&blog.output_dir)?;
    let assets = copy_static_assets(&blog.static_dir, &blog.output_dir)?;

    tracing::info!(
        "Generated {} posts and copied {} assets into {:?}",
        posts,
        assets,
        blog.output_dir
    );

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

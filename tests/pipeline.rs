//! End-to-end lifecycle tests: discover, compile, write, inject, watch.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use extra_sass::{ExtraSassPlugin, PluginConfig, RebuildWatcher};
use tempfile::TempDir;

const PAGE: &str =
    "<html><head><title>page</title></head><body><p>content</p></body></html>";

struct Project {
    _tmp: TempDir,
    config: PluginConfig,
}

impl Project {
    fn new(filename: &str, contents: &str) -> Self {
        let tmp = TempDir::new().unwrap();
        let styles = tmp.path().join("extra_sass");
        fs::create_dir(&styles).unwrap();
        fs::write(styles.join(filename), contents).unwrap();
        let config = PluginConfig::new(tmp.path().join("site")).with_styles_dir(styles);
        Self { _tmp: tmp, config }
    }

    fn artifact_path(&self, html: &str) -> PathBuf {
        let href = html
            .split("href=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .expect("injected link with href");
        self.config.site_dir.join(href)
    }
}

#[test]
fn scss_source_ends_up_linked_and_minified() {
    let project = Project::new("style.scss", "body { color: red; }\n");
    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&project.config);

    let html = plugin.on_post_page(PAGE, "", &project.config).unwrap();
    assert!(html.contains("<link rel=\"stylesheet\" href=\"assets/stylesheets/extra-style."));
    assert!(html.contains(".min.css\"></head>"));

    let css_path = project.artifact_path(&html);
    let css = fs::read_to_string(&css_path).unwrap();
    assert!(css.contains("body{color:red}"));
    assert!(css.contains("/*# sourceMappingURL=extra-style."));
}

#[test]
fn indented_sass_source_compiles() {
    let project = Project::new("style.css.sass", "body\n  color: red\n");
    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&project.config);

    let html = plugin.on_post_page(PAGE, "", &project.config).unwrap();
    let css = fs::read_to_string(project.artifact_path(&html)).unwrap();
    assert!(css.contains("body{color:red}"));
}

#[test]
fn source_map_sits_next_to_artifact_and_references_source() {
    let project = Project::new("style.scss", "body { color: red; }\n");
    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&project.config);

    let html = plugin.on_post_page(PAGE, "", &project.config).unwrap();
    let css_path = project.artifact_path(&html);
    let css_filename = css_path.file_name().unwrap().to_str().unwrap().to_owned();
    let map_path = css_path.with_file_name(format!("{css_filename}.map"));

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&map_path).unwrap()).unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], css_filename.as_str());
    assert!(
        map["sources"][0]
            .as_str()
            .unwrap()
            .ends_with("style.scss")
    );
    assert!(
        map["sourcesContent"][0]
            .as_str()
            .unwrap()
            .contains("color: red")
    );
}

#[test]
fn page_depth_changes_injected_href() {
    let project = Project::new("style.scss", "body { color: red; }\n");
    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&project.config);

    let home = plugin.on_post_page(PAGE, "", &project.config).unwrap();
    let nested = plugin
        .on_post_page(PAGE, "blog/2026/post/", &project.config)
        .unwrap();

    assert!(home.contains("href=\"assets/stylesheets/"));
    assert!(nested.contains("href=\"../../../assets/stylesheets/"));
}

#[test]
fn injection_happens_once_per_render_call() {
    let project = Project::new("style.scss", "body { color: red; }\n");
    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&project.config);

    let first = plugin.on_post_page(PAGE, "", &project.config).unwrap();
    let second = plugin.on_post_page(&first, "", &project.config).unwrap();
    assert_eq!(second.matches("<link rel=\"stylesheet\"").count(), 2);
}

#[test]
fn toml_configured_plugin_respects_strict() {
    let tmp = TempDir::new().unwrap();
    let styles = tmp.path().join("extra_sass");
    fs::create_dir(&styles).unwrap();
    fs::write(styles.join("style.scss"), "body { color: ; }}\n").unwrap();

    let toml = format!(
        "site_dir = {:?}\nstyles_dir = {:?}\nstrict = true\n",
        tmp.path().join("site"),
        styles
    );
    let config = PluginConfig::from_toml(&toml).unwrap();

    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&config);
    assert!(plugin.on_post_page(PAGE, "", &config).is_err());
}

#[test]
fn rebuild_watcher_fires_on_source_edit() {
    let project = Project::new("style.scss", "body { color: red; }\n");
    let mut plugin = ExtraSassPlugin::new();
    plugin.on_config(&project.config);

    let rebuilds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&rebuilds);
    let mut watcher = RebuildWatcher::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    plugin.on_serve(&mut watcher, &project.config).unwrap();

    fs::write(
        project.config.styles_dir.join("style.scss"),
        "body { color: blue; }\n",
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while rebuilds.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(50));
    }
    assert!(rebuilds.load(Ordering::SeqCst) > 0, "no rebuild triggered");
}

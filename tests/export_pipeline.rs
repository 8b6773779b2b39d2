use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use quotecraft::error::EXPORT_FAILED_MESSAGE;
use quotecraft::rendering::paint::PaintCommand;
use quotecraft::rendering::raster::encode_png;
use quotecraft::resources::ResourceLoader;
use quotecraft::{
    Color, Composition, Error, ExportConfig, ExportOutcome, ExportPipeline, PreviewTree, QuoteData, Studio,
    StudioConfig, TemplateId,
};

fn logo_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 128, 255, 255]));
    encode_png(&img).unwrap()
}

/// Serves one PNG for every reference, optionally after a delay, counting calls.
struct TestLoader {
    png: Vec<u8>,
    delay: Duration,
    calls: AtomicUsize,
}

impl TestLoader {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            png: logo_png(),
            delay,
            calls: AtomicUsize::new(0),
        })
    }
}

impl ResourceLoader for TestLoader {
    fn fetch<'a>(&'a self, _src: &'a str) -> BoxFuture<'a, quotecraft::Result<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            Ok(self.png.clone())
        })
    }
}

/// Never answers.
struct HangingLoader;

impl ResourceLoader for HangingLoader {
    fn fetch<'a>(&'a self, _src: &'a str) -> BoxFuture<'a, quotecraft::Result<Vec<u8>>> {
        Box::pin(futures::future::pending())
    }
}

fn fast_config(out: &std::path::Path) -> ExportConfig {
    ExportConfig {
        output_dir: out.to_path_buf(),
        supersample: 1,
        settle_delay_ms: 0,
        ..Default::default()
    }
}

fn mounted(template: TemplateId, data: &QuoteData) -> PreviewTree {
    let mut tree = PreviewTree::new();
    let comp = quotecraft::templates::lookup(template).unwrap().render(data).scaled(0.42);
    tree.mount(comp);
    tree
}

// Mostly blank canvas: a small square in the middle, white everywhere else.
fn sparse_tree() -> PreviewTree {
    let mut comp = Composition::canvas().scaled(0.42);
    comp.push(PaintCommand::Rect {
        rect: quotecraft::rendering::Rect::centered(540.0, 540.0, 100.0, 100.0),
        radius: 0.0,
        fill: Color::BLACK.into(),
    });
    let mut tree = PreviewTree::new();
    tree.mount(comp);
    tree
}

#[tokio::test]
async fn empty_tree_is_a_silent_no_op() {
    let out = tempfile::tempdir().unwrap();
    let pipeline = ExportPipeline::new(fast_config(out.path()), TestLoader::new(Duration::ZERO));
    let outcome = pipeline.export(&PreviewTree::new()).await.unwrap();
    assert!(matches!(outcome, ExportOutcome::NothingToExport));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn export_is_full_size_at_twice_resolution_on_white() {
    let out = tempfile::tempdir().unwrap();
    let config = ExportConfig {
        output_dir: out.path().to_path_buf(),
        settle_delay_ms: 0,
        ..Default::default()
    };
    let pipeline = ExportPipeline::new(config, TestLoader::new(Duration::ZERO));
    let tree = sparse_tree();

    let mut shots = Vec::new();
    for _ in 0..2 {
        match pipeline.export(&tree).await.unwrap() {
            ExportOutcome::Delivered(img) => shots.push(img),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    for shot in &shots {
        assert_eq!((shot.screenshot.width, shot.screenshot.height), (2160, 2160));
        let file = shot.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file.starts_with("quote-design-") && file.ends_with(".png"), "{}", file);
        let decoded = image::load_from_memory(&std::fs::read(&shot.path).unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (2160, 2160));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(decoded.get_pixel(2159, 2159).0, [255, 255, 255, 255]);
        assert_eq!(decoded.get_pixel(1080, 1080).0, [0, 0, 0, 255]);
    }
    assert_eq!(shots[0].screenshot.digest(), shots[1].screenshot.digest());
}

#[tokio::test]
async fn second_export_while_running_is_ignored() {
    let out = tempfile::tempdir().unwrap();
    let loader = TestLoader::new(Duration::from_millis(400));
    let pipeline = ExportPipeline::new(fast_config(out.path()), loader);
    let tree = mounted(TemplateId::BusinessPro, &QuoteData::new("Lead well").with_logo("/logo.png"));

    let (first, second) = tokio::join!(pipeline.export(&tree), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        pipeline.export(&tree).await
    });
    assert!(matches!(first.unwrap(), ExportOutcome::Delivered(_)));
    assert!(matches!(second.unwrap(), ExportOutcome::AlreadyRunning));

    // flag is released afterwards
    assert!(matches!(pipeline.export(&tree).await.unwrap(), ExportOutcome::Delivered(_)));
}

#[tokio::test]
async fn failure_reports_generic_message_and_cleans_up() {
    let out = tempfile::tempdir().unwrap();
    let config = ExportConfig {
        supersample: 0,
        ..fast_config(out.path())
    };
    let pipeline = ExportPipeline::new(config, TestLoader::new(Duration::ZERO));
    let tree = sparse_tree();

    for _ in 0..2 {
        let err = pipeline.export(&tree).await.unwrap_err();
        assert!(matches!(err, Error::ExportError { .. }));
        assert_eq!(err.to_string(), EXPORT_FAILED_MESSAGE);
        assert!(pipeline.staging().is_empty());
    }
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn hanging_image_times_out_and_export_continues() {
    let out = tempfile::tempdir().unwrap();
    let config = ExportConfig {
        image_timeout_ms: 50,
        ..fast_config(out.path())
    };
    let pipeline = ExportPipeline::new(config, Arc::new(HangingLoader));
    let tree = mounted(TemplateId::NeonGlow, &QuoteData::new("Shine").with_logo("/slow.png"));

    let outcome = tokio::time::timeout(Duration::from_secs(30), pipeline.export(&tree))
        .await
        .expect("export should not wait on the hanging image");
    assert!(matches!(outcome.unwrap(), ExportOutcome::Delivered(_)));
}

#[tokio::test]
async fn decoded_images_are_not_fetched_twice() {
    let out = tempfile::tempdir().unwrap();
    let loader = TestLoader::new(Duration::ZERO);
    let pipeline = ExportPipeline::new(fast_config(out.path()), loader.clone());
    let tree = mounted(TemplateId::PremiumGold, &QuoteData::new("Grace").with_logo("/logo.png"));

    pipeline.export(&tree).await.unwrap();
    pipeline.export(&tree).await.unwrap();
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn image_cache_holds_only_current_references() {
    let out = tempfile::tempdir().unwrap();
    let loader = TestLoader::new(Duration::ZERO);
    let pipeline = ExportPipeline::new(fast_config(out.path()), loader.clone());

    for i in 0..5 {
        let logo = format!("/logo-{}.png", i);
        let tree = mounted(TemplateId::BusinessPro, &QuoteData::new("Lead well").with_logo(logo));
        assert!(matches!(pipeline.export(&tree).await.unwrap(), ExportOutcome::Delivered(_)));
        assert_eq!(pipeline.cached_images(), 1);
    }
    assert_eq!(loader.calls.load(Ordering::SeqCst), 5);

    let bare = mounted(TemplateId::BusinessPro, &QuoteData::new("Lead well"));
    pipeline.export(&bare).await.unwrap();
    assert_eq!(pipeline.cached_images(), 0);
}

#[tokio::test]
async fn studio_export_renders_the_selected_template() {
    let store = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let config = StudioConfig {
        store_dir: Some(store.path().to_path_buf()),
        export: fast_config(out.path()),
        ..Default::default()
    };
    let mut studio = Studio::with_loader(config, TestLoader::new(Duration::ZERO)).unwrap();
    studio.set_text("God is good");
    assert_eq!(studio.template(), TemplateId::DevotionClassic);

    match studio.export().await.unwrap() {
        ExportOutcome::Delivered(img) => {
            assert_eq!(img.screenshot.width, 1080);
            assert!(img.path.exists());
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    // the live preview keeps its display scale
    assert_eq!(studio.preview().locate().unwrap().scale, 0.42);
}

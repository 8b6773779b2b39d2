use quotecraft::rendering::paint::PaintCommand;
use quotecraft::rendering::raster::{rasterize, Resources};
use quotecraft::{Color, QuoteData, TemplateId, TEMPLATES};

fn full_data() -> QuoteData {
    QuoteData::new("Faith can move mountains when we walk together in love and hope every day.")
        .with_author("John Doe")
        .with_church_name("Christ Chosen Zion City Ministry")
        .with_church_handle("@churchhandle")
        .with_logo("/default-logo.png")
}

#[test]
fn every_template_handles_absent_fields() {
    let empty = QuoteData::default();
    for t in &TEMPLATES {
        let comp = t.render(&empty);
        assert_eq!((comp.width, comp.height), (1080, 1080), "{}", t.id);
        assert!(
            !comp.commands.iter().any(|c| matches!(c, PaintCommand::Image { .. })),
            "{} drew an image without a logo",
            t.id
        );
        assert!(!comp.text_content().is_empty(), "{} rendered no placeholder", t.id);
    }
}

#[test]
fn every_template_uses_the_logo_when_present() {
    for t in &TEMPLATES {
        let comp = t.render(&full_data());
        assert_eq!(comp.image_sources(), vec!["/default-logo.png".to_string()], "{}", t.id);
    }
}

#[test]
fn quote_text_stays_inside_the_canvas() {
    let long = QuoteData::new("w".repeat(100))
        .with_author("An Author With A Long Name")
        .with_church_name("Christ Chosen Zion City Ministry")
        .with_church_handle("@churchhandle")
        .with_logo("/default-logo.png");
    for t in &TEMPLATES {
        for cmd in &t.render(&long).commands {
            if let PaintCommand::Text { y, block, .. } = cmd {
                assert!(*y >= 0.0 && y + block.height() <= 1080.0, "{} text overflows", t.id);
            }
        }
    }
}

#[test]
fn placeholders_follow_each_design() {
    let text = |id: TemplateId| {
        let t = quotecraft::templates::lookup(id).unwrap();
        t.render(&QuoteData::default()).text_content().join("\n")
    };
    assert!(text(TemplateId::DevotionClassic).contains("Psalm 23:3"));
    assert!(text(TemplateId::BusinessPro).contains("WWW.YOURWEBSITE.COM"));
    assert!(text(TemplateId::GradientBurst).contains("FAITH"));
    assert!(text(TemplateId::NeonGlow).contains("SHINE"));
}

#[test]
fn every_template_rasterizes_with_missing_images() {
    for t in &TEMPLATES {
        let comp = t.render(&full_data());
        let img = rasterize(&comp, 0.25, Color::WHITE, &Resources::new()).unwrap();
        assert_eq!(img.dimensions(), (270, 270), "{}", t.id);
        assert!(img.pixels().all(|p| p[3] == 255), "{} left transparent pixels", t.id);
    }
}

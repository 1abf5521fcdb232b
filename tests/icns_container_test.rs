// ICNS 容器布局测试
use iconforge::icon::planner::ICNS_TYPES;
use iconforge::icon::{ConversionConfig, IconConverter, Quality, RasterImage, TargetFormat};

struct Chunk {
    tag: [u8; 4],
    declared_len: u32,
    payload: Vec<u8>,
}

fn parse_icns(bytes: &[u8]) -> (u32, Vec<Chunk>) {
    assert_eq!(&bytes[0..4], b"icns");
    let total = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

    let mut chunks = Vec::new();
    let mut pos = 8usize;
    while pos < bytes.len() {
        let tag = [bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]];
        let declared_len =
            u32::from_be_bytes([bytes[pos + 4], bytes[pos + 5], bytes[pos + 6], bytes[pos + 7]]);
        let end = pos + declared_len as usize;
        assert!(end <= bytes.len(), "chunk stays inside the file");
        chunks.push(Chunk {
            tag,
            declared_len,
            payload: bytes[pos + 8..end].to_vec(),
        });
        pos = end;
    }

    (total, chunks)
}

fn disc(size: u32) -> RasterImage {
    let centre = size as f32 / 2.0;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - centre;
            let dy = y as f32 + 0.5 - centre;
            let inside = dx * dx + dy * dy <= centre * centre;
            pixels.extend_from_slice(&[30, 120, 220, if inside { 255 } else { 0 }]);
        }
    }
    RasterImage::new(size, size, pixels).expect("valid disc")
}

#[test]
fn scenario_64_gives_seven_tagged_png_chunks() {
    let config = ConversionConfig {
        quality: Quality::High,
        ..ConversionConfig::default()
    };
    let bytes = IconConverter::default()
        .build_container(&disc(64), TargetFormat::Icns, &config)
        .expect("icns container")
        .bytes;

    let (total, chunks) = parse_icns(&bytes);
    assert_eq!(total as usize, bytes.len());
    assert_eq!(chunks.len(), 7);
    assert_eq!(
        total,
        8 + chunks.iter().map(|c| c.declared_len).sum::<u32>()
    );

    for (chunk, (size, tag)) in chunks.iter().zip(ICNS_TYPES) {
        assert_eq!(chunk.tag, tag.0);
        assert_eq!(chunk.declared_len as usize, 8 + chunk.payload.len());

        let decoded = image::load_from_memory_with_format(&chunk.payload, image::ImageFormat::Png)
            .expect("payload is a PNG");
        assert_eq!((decoded.width(), decoded.height()), (size, size));
    }
}

#[test]
fn icns_ignores_bitmap_preference() {
    let with_bmp = ConversionConfig {
        quality: Quality::Low,
        use_bitmap_entries: true,
        ..ConversionConfig::default()
    };
    let without_bmp = ConversionConfig {
        use_bitmap_entries: false,
        ..with_bmp.clone()
    };

    let converter = IconConverter::default();
    let a = converter
        .build_container(&disc(32), TargetFormat::Icns, &with_bmp)
        .expect("icns");
    let b = converter
        .build_container(&disc(32), TargetFormat::Icns, &without_bmp)
        .expect("icns");

    assert_eq!(a, b);
}

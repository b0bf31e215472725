use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::io::Cursor;

/// PNG gris uniforme: la heurística no encuentra nada en él.
pub fn uniform_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value]))))
}

/// Tablero de alto contraste: dispara bordes y varianza en la heurística.
#[allow(dead_code)]
pub fn checkerboard_png(size: u32, cell: u32) -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(GrayImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 { Luma([16]) } else { Luma([240]) }
    })))
}

fn encode(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("PNG encoding to memory");
    buf
}

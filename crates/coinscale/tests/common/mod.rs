#![allow(dead_code)]

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

pub const COIN_CENTER: (i32, i32) = (250, 300);
pub const COIN_RADIUS: i32 = 60;
pub const PHONE_W: u32 = 300;
pub const PHONE_H: u32 = 500;

/// Light table with a dark coin on the left and a dark phone on the right.
pub fn coin_and_phone() -> RgbImage {
    let mut img = RgbImage::from_pixel(1000, 800, Rgb([225, 225, 220]));
    draw_filled_circle_mut(&mut img, COIN_CENTER, COIN_RADIUS, Rgb([60, 50, 40]));
    draw_filled_rect_mut(
        &mut img,
        Rect::at(550, 150).of_size(PHONE_W, PHONE_H),
        Rgb([25, 25, 30]),
    );
    img
}

/// Same table with only the phone on it.
pub fn phone_only() -> RgbImage {
    let mut img = RgbImage::from_pixel(1000, 800, Rgb([225, 225, 220]));
    draw_filled_rect_mut(
        &mut img,
        Rect::at(550, 150).of_size(PHONE_W, PHONE_H),
        Rgb([25, 25, 30]),
    );
    img
}

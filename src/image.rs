//! Camera image headers and the blobs they describe.
//!
//! An image stores up to four representations: a visual reference (a plain picture for
//! display), plus pinhole, spherical, and cylindrical projections that can be mapped onto the
//! scans. Each representation may carry a JPEG or PNG blob and a PNG mask.

use crate::{DateTime, RigidBody};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The camera geometry of an image representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// A picture for display only.
    Visual,
    /// A pinhole camera.
    Pinhole,
    /// A spherical panorama.
    Spherical,
    /// A cylindrical panorama.
    Cylindrical,
}

/// The encoding of an image blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// A JPEG image.
    Jpeg,
    /// A PNG image.
    Png,
    /// A PNG mask marking which pixels are valid.
    PngMask,
}

/// Pixel dimensions and blob sizes shared by every representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Raster {
    /// The image width, in pixels.
    pub image_width: u64,
    /// The image height, in pixels.
    pub image_height: u64,
    /// The size of the JPEG blob, in bytes, or zero.
    pub jpeg_image_size: u64,
    /// The size of the PNG blob, in bytes, or zero.
    pub png_image_size: u64,
    /// The size of the PNG mask blob, in bytes, or zero.
    pub image_mask_size: u64,
}

/// A picture for display only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualReferenceRepresentation {
    /// Dimensions and blob sizes.
    pub raster: Raster,
}

/// An image from a pinhole camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinholeRepresentation {
    /// Dimensions and blob sizes.
    pub raster: Raster,
    /// The camera's focal length, in meters.
    pub focal_length: f64,
    /// The width of a pixel, in meters.
    pub pixel_width: f64,
    /// The height of a pixel, in meters.
    pub pixel_height: f64,
    /// The x coordinate of the principal point, in pixels.
    pub principal_point_x: f64,
    /// The y coordinate of the principal point, in pixels.
    pub principal_point_y: f64,
}

/// A spherical panorama.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphericalRepresentation {
    /// Dimensions and blob sizes.
    pub raster: Raster,
    /// The width of a pixel, in radians.
    pub pixel_width: f64,
    /// The height of a pixel, in radians.
    pub pixel_height: f64,
}

/// A cylindrical panorama.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylindricalRepresentation {
    /// Dimensions and blob sizes.
    pub raster: Raster,
    /// The radius of the cylinder, in meters.
    pub radius: f64,
    /// The y coordinate of the principal point, in pixels.
    pub principal_point_y: f64,
    /// The width of a pixel, in radians.
    pub pixel_width: f64,
    /// The height of a pixel, in meters.
    pub pixel_height: f64,
}

/// The header of one camera image.
///
/// Blob sizes in the representations declare how big each blob will be. A zero size lets the
/// first [Writer::write_image2d_data](crate::Writer::write_image2d_data) call decide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image2D {
    /// Globally unique identifier. Filled in by the writer when empty.
    pub guid: String,
    /// A user-defined name.
    pub name: String,
    /// A user-defined description.
    pub description: String,
    /// The guid of the scan that was acquired alongside this image.
    pub associated_data3d_guid: String,
    /// When the image was taken.
    pub acquisition_date_time: DateTime,
    /// The pose of the camera.
    pub pose: RigidBody,

    /// The manufacturer of the camera.
    pub sensor_vendor: String,
    /// The model of the camera.
    pub sensor_model: String,
    /// The serial number of the camera.
    pub sensor_serial_number: String,

    /// The visual reference representation.
    pub visual_reference: Option<VisualReferenceRepresentation>,
    /// The pinhole representation.
    pub pinhole: Option<PinholeRepresentation>,
    /// The spherical representation.
    pub spherical: Option<SphericalRepresentation>,
    /// The cylindrical representation.
    pub cylindrical: Option<CylindricalRepresentation>,
}

/// Describes one transferable image blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageBlobDescriptor {
    /// The projection.
    pub projection: Projection,
    /// The encoding.
    pub format: ImageFormat,
    /// The image width, in pixels.
    pub width: u64,
    /// The image height, in pixels.
    pub height: u64,
    /// The blob's length, in bytes.
    pub byte_size: u64,
    /// [ImageFormat::PngMask] if the representation has a mask.
    pub mask_format: Option<ImageFormat>,
    /// The format of the visual reference representation, if there is one.
    pub visual_format: Option<ImageFormat>,
}

impl Raster {
    /// Returns the size of the blob in this format.
    pub fn size(&self, format: ImageFormat) -> u64 {
        match format {
            ImageFormat::Jpeg => self.jpeg_image_size,
            ImageFormat::Png => self.png_image_size,
            ImageFormat::PngMask => self.image_mask_size,
        }
    }

    /// Sets the size of the blob in this format.
    pub fn set_size(&mut self, format: ImageFormat, size: u64) {
        match format {
            ImageFormat::Jpeg => self.jpeg_image_size = size,
            ImageFormat::Png => self.png_image_size = size,
            ImageFormat::PngMask => self.image_mask_size = size,
        }
    }

    /// Returns the image format, preferring JPEG over PNG.
    pub fn image_format(&self) -> Option<ImageFormat> {
        if self.jpeg_image_size > 0 {
            Some(ImageFormat::Jpeg)
        } else if self.png_image_size > 0 {
            Some(ImageFormat::Png)
        } else {
            None
        }
    }

    /// Returns [ImageFormat::PngMask] if there is a mask.
    pub fn mask_format(&self) -> Option<ImageFormat> {
        (self.image_mask_size > 0).then_some(ImageFormat::PngMask)
    }
}

impl Image2D {
    /// Returns the raster of a representation, if the header has it.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::{Image2D, PinholeRepresentation, image::Projection};
    /// let image = Image2D { pinhole: Some(PinholeRepresentation::default()), ..Default::default() };
    /// assert!(image.raster(Projection::Pinhole).is_some());
    /// assert!(image.raster(Projection::Spherical).is_none());
    /// ```
    pub fn raster(&self, projection: Projection) -> Option<&Raster> {
        match projection {
            Projection::Visual => self.visual_reference.as_ref().map(|r| &r.raster),
            Projection::Pinhole => self.pinhole.as_ref().map(|r| &r.raster),
            Projection::Spherical => self.spherical.as_ref().map(|r| &r.raster),
            Projection::Cylindrical => self.cylindrical.as_ref().map(|r| &r.raster),
        }
    }

    /// Returns the raster of a representation, mutably.
    pub fn raster_mut(&mut self, projection: Projection) -> Option<&mut Raster> {
        match projection {
            Projection::Visual => self.visual_reference.as_mut().map(|r| &mut r.raster),
            Projection::Pinhole => self.pinhole.as_mut().map(|r| &mut r.raster),
            Projection::Spherical => self.spherical.as_mut().map(|r| &mut r.raster),
            Projection::Cylindrical => self.cylindrical.as_mut().map(|r| &mut r.raster),
        }
    }

    /// Describes this image's main blob.
    ///
    /// Projected representations win over the visual reference, in pinhole, spherical,
    /// cylindrical order. Returns `None` if no representation has an image blob.
    pub fn descriptor(&self) -> Option<ImageBlobDescriptor> {
        let visual_format = self.raster(Projection::Visual).and_then(Raster::image_format);
        [
            Projection::Pinhole,
            Projection::Spherical,
            Projection::Cylindrical,
            Projection::Visual,
        ]
        .into_iter()
        .find_map(|projection| {
            let raster = self.raster(projection)?;
            let format = raster.image_format()?;
            Some(ImageBlobDescriptor {
                projection,
                format,
                width: raster.image_width,
                height: raster.image_height,
                byte_size: raster.size(format),
                mask_format: raster.mask_format(),
                visual_format,
            })
        })
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Visual => f.write_str("visual reference"),
            Projection::Pinhole => f.write_str("pinhole"),
            Projection::Spherical => f.write_str("spherical"),
            Projection::Cylindrical => f.write_str("cylindrical"),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Jpeg => f.write_str("JPEG"),
            ImageFormat::Png => f.write_str("PNG"),
            ImageFormat::PngMask => f.write_str("PNG mask"),
        }
    }
}

//! Windows GDI capture backend.
//!
//! Monitor enumeration via `EnumDisplayMonitors` and pixel capture via
//! BitBlt/GetDIBits. The screen DC is acquired once and held for the backend's
//! lifetime; geometry queries hit the live display configuration on each call.

use anyhow::{Result, anyhow};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::core::BOOL;
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, EnumDisplayMonitors, GetDC, GetDIBits,
    GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, ReleaseDC, SRCCOPY, SelectObject,
};
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, MDT_EFFECTIVE_DPI};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

use crate::geometry::Rect;
use crate::matcher::LogicalScreen;
use crate::platform::{CaptureBuffer, ScreenBackend};

const BASE_DPI: f64 = 96.0;

fn rect_from(rc: RECT) -> Rect {
    Rect {
        left: rc.left,
        top: rc.top,
        width: rc.right - rc.left,
        height: rc.bottom - rc.top,
    }
}

/// GDI-backed screen capture session.
pub struct GdiBackend {
    screen_dc: HDC,
}

// The screen DC refers to the process-global display surface, not to any
// thread-affine window state.
unsafe impl Send for GdiBackend {}

impl GdiBackend {
    pub fn new() -> Result<Self> {
        let screen_dc = unsafe { GetDC(Some(HWND(std::ptr::null_mut()))) };
        if screen_dc.is_invalid() {
            return Err(anyhow!("failed to get screen DC"));
        }
        Ok(Self { screen_dc })
    }
}

impl Drop for GdiBackend {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(Some(HWND(std::ptr::null_mut())), self.screen_dc);
        }
    }
}

unsafe extern "system" fn collect_monitor(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    monitors.push(hmonitor);
    BOOL::from(true)
}

fn enumerate_handles() -> Result<Vec<HMONITOR>> {
    let mut handles: Vec<HMONITOR> = Vec::new();
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(collect_monitor),
            LPARAM(&mut handles as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err(anyhow!("EnumDisplayMonitors failed"));
    }
    if handles.is_empty() {
        return Err(anyhow!("no active display"));
    }
    Ok(handles)
}

fn monitor_rect(hmonitor: HMONITOR) -> Result<Rect> {
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    let ok = unsafe { GetMonitorInfoW(hmonitor, &mut info) };
    if !ok.as_bool() {
        return Err(anyhow!("GetMonitorInfoW failed"));
    }
    Ok(rect_from(info.rcMonitor))
}

/// Logical screen list derived from per-monitor effective DPI.
///
/// Geometry is the device rect scaled uniformly by `96 / dpi` (origin
/// included, so re-scaling recovers the device footprint); the matcher's
/// overlap fallback absorbs the rounding drift this introduces on mixed-DPI
/// layouts.
pub fn logical_screens() -> Result<Vec<LogicalScreen>> {
    enumerate_handles()?
        .into_iter()
        .map(|hmonitor| {
            let rect = monitor_rect(hmonitor)?;

            let mut dpi_x = BASE_DPI as u32;
            let mut dpi_y = BASE_DPI as u32;
            unsafe {
                // Fall back to 96 when the DPI query is unavailable.
                let _ = GetDpiForMonitor(hmonitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y);
            }
            let dpr = dpi_x.max(1) as f64 / BASE_DPI;

            Ok(LogicalScreen::new(
                Rect {
                    left: (rect.left as f64 / dpr).round() as i32,
                    top: (rect.top as f64 / dpr).round() as i32,
                    width: (rect.width as f64 / dpr).round() as i32,
                    height: (rect.height as f64 / dpr).round() as i32,
                },
                dpr,
            ))
        })
        .collect()
}

impl ScreenBackend for GdiBackend {
    fn screens(&mut self) -> Result<Vec<Rect>> {
        let virtual_rect = unsafe {
            Rect {
                left: GetSystemMetrics(SM_XVIRTUALSCREEN),
                top: GetSystemMetrics(SM_YVIRTUALSCREEN),
                width: GetSystemMetrics(SM_CXVIRTUALSCREEN),
                height: GetSystemMetrics(SM_CYVIRTUALSCREEN),
            }
        };

        let mut screens = vec![virtual_rect];
        for hmonitor in enumerate_handles()? {
            screens.push(monitor_rect(hmonitor)?);
        }
        Ok(screens)
    }

    fn capture(&mut self, rect: Rect) -> Result<CaptureBuffer> {
        let width = rect.width.max(1);
        let height = rect.height.max(1);

        unsafe {
            let mem_dc = CreateCompatibleDC(Some(self.screen_dc));
            if mem_dc.is_invalid() {
                return Err(anyhow!("failed to create memory DC"));
            }

            let bitmap = CreateCompatibleBitmap(self.screen_dc, width, height);
            if bitmap.is_invalid() {
                let _ = DeleteDC(mem_dc);
                return Err(anyhow!("failed to create bitmap"));
            }

            let old_bitmap = SelectObject(mem_dc, bitmap.into());
            let blt = BitBlt(
                mem_dc,
                0,
                0,
                width,
                height,
                Some(self.screen_dc),
                rect.left,
                rect.top,
                SRCCOPY,
            );
            SelectObject(mem_dc, old_bitmap);

            if blt.is_err() {
                let _ = DeleteDC(mem_dc);
                let _ = DeleteObject(bitmap.into());
                return Err(anyhow!("BitBlt failed"));
            }

            let mut bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    // Negative height: top-down rows.
                    biHeight: -height,
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    biSizeImage: 0,
                    biXPelsPerMeter: 0,
                    biYPelsPerMeter: 0,
                    biClrUsed: 0,
                    biClrImportant: 0,
                },
                bmiColors: [Default::default(); 1],
            };

            let data_size = (width * height * 4) as usize;
            let mut pixel_data = vec![0u8; data_size];

            let lines_copied = GetDIBits(
                self.screen_dc,
                bitmap,
                0,
                height as u32,
                Some(pixel_data.as_mut_ptr() as *mut std::ffi::c_void),
                &mut bmi,
                DIB_RGB_COLORS,
            );

            let _ = DeleteDC(mem_dc);
            let _ = DeleteObject(bitmap.into());

            if lines_copied <= 0 {
                return Err(anyhow!("failed to extract pixel data from bitmap"));
            }

            Ok(CaptureBuffer {
                width: width as u32,
                height: height as u32,
                data: pixel_data,
            })
        }
    }
}

//! USB vendor control handler
//!
//! Bridges embassy-usb's control pipe to the dispatcher. embassy-usb
//! collects a whole OUT data stage before calling the handler, so the
//! payload is replayed to the dispatcher in low-speed sized chunks.

use defmt::*;
use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
use embassy_usb::Handler;
use marquee_core::{Dispatcher, SetupReply};
use marquee_protocol::setup::{VENDOR_IN, VENDOR_OUT};
use marquee_protocol::{host, SetupPacket};

use crate::board::{Display, FrameTicker, SharedWatchdog};

/// Vendor requests addressed to the device
fn is_ours(req: &Request) -> bool {
    req.request_type == RequestType::Vendor && req.recipient == Recipient::Device
}

fn setup_packet(request_type: u8, req: &Request) -> SetupPacket {
    SetupPacket {
        request_type,
        request: req.request,
        value: req.value,
        index: req.index,
        length: req.length,
    }
}

/// Control pipe handler owning the matrix state
pub struct MatrixHandler {
    dispatcher: Dispatcher<Display, FrameTicker>,
}

impl MatrixHandler {
    pub fn new(dispatcher: Dispatcher<Display, FrameTicker>) -> Self {
        Self { dispatcher }
    }
}

impl Handler for MatrixHandler {
    fn reset(&mut self) {
        info!("USB bus reset");
        if let Some(result) = self.dispatcher.on_bus_reset(SharedWatchdog) {
            info!("Oscillator re-trimmed: {}", result);
        }
    }

    fn configured(&mut self, configured: bool) {
        info!("USB configured: {}", configured);
    }

    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        if !is_ours(&req) {
            return None;
        }

        let packet = setup_packet(VENDOR_OUT, &req);
        let expected = match self.dispatcher.on_setup(&packet) {
            SetupReply::ReceiveData { expected } => Some(expected),
            SetupReply::Done | SetupReply::Send(_) => None,
        };

        if let Some(expected) = expected {
            let mut complete = expected == 0;
            for chunk in host::chunks(data) {
                if self.dispatcher.on_write_chunk(chunk) {
                    complete = true;
                    break;
                }
            }
            if !complete {
                warn!("Short write: {} of {} bytes", data.len(), expected);
            }
        }

        let faults = self.dispatcher.sink_faults();
        if faults > 0 {
            debug!("LED driver faults so far: {}", faults);
        }

        Some(OutResponse::Accepted)
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if !is_ours(&req) {
            return None;
        }

        let packet = setup_packet(VENDOR_IN, &req);
        let len = match self.dispatcher.on_setup(&packet) {
            SetupReply::Send(bytes) => {
                let len = bytes.len().min(buf.len()).min(usize::from(req.length));
                buf[..len].copy_from_slice(&bytes[..len]);
                len
            }
            SetupReply::Done | SetupReply::ReceiveData { .. } => 0,
        };

        Some(InResponse::Accepted(&buf[..len]))
    }
}

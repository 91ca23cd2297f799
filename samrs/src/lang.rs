/// This will be invoked on `panic!`.  Applications can override this by
/// adding the 'app_panic_handler' feature.
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    crate::arm_m::exc::halt()
}

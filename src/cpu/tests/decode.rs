// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the instruction decode logic.
use super::*;

const INDX: &[u8; 16] = b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

/// runs one arbitrary operation on a brand new CPU
/// returns the CPU for inspection
fn try_single_op(op: &[u8]) -> Result<CPU> {
    let mut cpu = CPU::default();
    cpu.mem.load_region(Program, op)?;
    cpu.v = *INDX;
    cpu.flags.quirks = Quirks::from(false);
    cpu.tick()?;
    Ok(cpu)
}

fn run_single_op(op: &[u8]) -> CPU {
    try_single_op(op).unwrap()
}

/// asserts that the op was skipped over without effect
fn skipped(op: &[u8]) {
    let cpu = run_single_op(op);
    assert_eq!(0x202, cpu.pc);
    assert_eq!(INDX, cpu.v());
    assert_eq!(State::Running, cpu.state);
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test] fn cls()   { assert!(run_single_op(b"\x00\xe0").screen.is_blank()); }
    #[test] fn ret()   { assert!(matches!(try_single_op(b"\x00\xee"), Err(Error::StackUnderflow { pc: 0x200 }))); }
    #[test] fn u0420() { skipped(b"\x04\x20"); }
}
#[rustfmt::skip]
mod jump {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x12\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x12\x31").pc); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x22\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x22\x31").pc); }
    #[test] fn stacked()   { assert_eq!(&[0x202u16][..], run_single_op(b"\x22\x30").stack()); }
}
#[rustfmt::skip]
mod skeb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x30\x00").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x30\x01").pc); }
}
#[rustfmt::skip]
mod sneb {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x40\x01").pc); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x40\x00").pc); }
}
#[rustfmt::skip]
mod se {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x50\x00").pc); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x50\x10").pc); }
    #[test] fn u5ff1() { skipped(b"\x5f\xf1"); }
    #[test] fn u5ff2() { skipped(b"\x5f\xf2"); }
    #[test] fn u5ff3() { skipped(b"\x5f\xf3"); }
    #[test] fn u5ff4() { skipped(b"\x5f\xf4"); }
    #[test] fn u5ff5() { skipped(b"\x5f\xf5"); }
    #[test] fn u5ff6() { skipped(b"\x5f\xf6"); }
    #[test] fn u5ff7() { skipped(b"\x5f\xf7"); }
    #[test] fn u5ff8() { skipped(b"\x5f\xf8"); }
    #[test] fn u5ff9() { skipped(b"\x5f\xf9"); }
    #[test] fn u5ffa() { skipped(b"\x5f\xfa"); }
    #[test] fn u5ffb() { skipped(b"\x5f\xfb"); }
    #[test] fn u5ffc() { skipped(b"\x5f\xfc"); }
    #[test] fn u5ffd() { skipped(b"\x5f\xfd"); }
    #[test] fn u5ffe() { skipped(b"\x5f\xfe"); }
    #[test] fn u5fff() { skipped(b"\x5f\xff"); }
}
#[rustfmt::skip]
mod mov {
    use super::*;
    #[test] fn w00() { assert_eq!(0x00, run_single_op(b"\x61\x00").v[1]); }
    #[test] fn wc5() { assert_eq!(0xc5, run_single_op(b"\x62\xc5").v[2]); }
    #[test] fn wff() { assert_eq!(0xff, run_single_op(b"\x63\xff").v[3]); }
}
#[rustfmt::skip]
mod add {
    use super::*;
    #[test] fn p00() { assert_eq!(0x01, run_single_op(b"\x71\x00").v[1]); }
    #[test] fn pc5() { assert_eq!(0xc7, run_single_op(b"\x72\xc5").v[2]); }
    #[test] fn pff() { assert_eq!(0x02, run_single_op(b"\x73\xff").v[3]); }
    #[test] fn nof() { assert_eq!(0x0f, run_single_op(b"\x73\xff").v[0xf]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn mov()  { assert_eq!(0x02, run_single_op(b"\x81\x20").v[1]); }
    #[test] fn or()   { assert_eq!(0x03, run_single_op(b"\x81\x21").v[1]); }
    #[test] fn and()  { assert_eq!(0x00, run_single_op(b"\x81\x22").v[1]); }
    #[test] fn xor()  { assert_eq!(0x03, run_single_op(b"\x81\x23").v[1]); }
    #[test] fn add()  { assert_eq!(0x03, run_single_op(b"\x81\x24").v[1]); }
    #[test] fn sub()  { assert_eq!(0xff, run_single_op(b"\x81\x25").v[1]); }
    #[test] fn shr()  { assert_eq!(0x00, run_single_op(b"\x81\x26").v[1]); }
    #[test] fn bsub() { assert_eq!(0x01, run_single_op(b"\x81\x27").v[1]); }
    #[test] fn u8128() { skipped(b"\x81\x28"); }
    #[test] fn u8129() { skipped(b"\x81\x29"); }
    #[test] fn u812a() { skipped(b"\x81\x2a"); }
    #[test] fn u812b() { skipped(b"\x81\x2b"); }
    #[test] fn u812c() { skipped(b"\x81\x2c"); }
    #[test] fn u812d() { skipped(b"\x81\x2d"); }
    #[test] fn shl()  { assert_eq!(0x02, run_single_op(b"\x81\x2e").v[1]); }
    #[test] fn u812f() { skipped(b"\x81\x2f"); }
}
#[rustfmt::skip]
mod vf {
    use super::*;
    #[test] fn add()  { assert_eq!(0, run_single_op(b"\x81\x24").v[0xf]); }
    #[test] fn sub()  { assert_eq!(0, run_single_op(b"\x81\x25").v[0xf]); }
    #[test] fn shr()  { assert_eq!(1, run_single_op(b"\x81\x26").v[0xf]); }
    #[test] fn bsub() { assert_eq!(1, run_single_op(b"\x81\x27").v[0xf]); }
    #[test] fn shl()  { assert_eq!(0, run_single_op(b"\x81\x2e").v[0xf]); }
}
#[rustfmt::skip]
mod sne {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x90\x10").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x90\x00").pc); }
    #[test] fn u9ff1() { skipped(b"\x9f\xf1"); }
    #[test] fn u9ff2() { skipped(b"\x9f\xf2"); }
    #[test] fn u9ff3() { skipped(b"\x9f\xf3"); }
    #[test] fn u9ff4() { skipped(b"\x9f\xf4"); }
    #[test] fn u9ff5() { skipped(b"\x9f\xf5"); }
    #[test] fn u9ff6() { skipped(b"\x9f\xf6"); }
    #[test] fn u9ff7() { skipped(b"\x9f\xf7"); }
    #[test] fn u9ff8() { skipped(b"\x9f\xf8"); }
    #[test] fn u9ff9() { skipped(b"\x9f\xf9"); }
    #[test] fn u9ffa() { skipped(b"\x9f\xfa"); }
    #[test] fn u9ffb() { skipped(b"\x9f\xfb"); }
    #[test] fn u9ffc() { skipped(b"\x9f\xfc"); }
    #[test] fn u9ffd() { skipped(b"\x9f\xfd"); }
    #[test] fn u9ffe() { skipped(b"\x9f\xfe"); }
    #[test] fn u9fff() { skipped(b"\x9f\xff"); }
}
#[rustfmt::skip]
mod movi {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\xa2\x30").i()); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\xa2\x31").i()); }
}
#[rustfmt::skip]
mod jmpr {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\xb2\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\xb2\x31").pc); }
}
#[rustfmt::skip]
mod rand {
    use super::*;
    // for exhaustive testing, see src/cpu/tests.rs
    #[test] fn rand() { assert!(run_single_op(b"\xc0\x01").v[0] <= 1); }
}
#[rustfmt::skip]
mod draw {
    use super::*;
    // I = 0, which holds nothing but zeroes
    #[test] fn draw() { assert!(run_single_op(b"\xd0\x0f").screen.is_blank()); }
}
#[rustfmt::skip]
mod key {
    use super::*;
    #[test] fn skip_key_equals()     { assert_eq!(0x202, run_single_op(b"\xe0\x9e").pc); }
    #[test] fn skip_key_not_equals() { assert_eq!(0x204, run_single_op(b"\xe0\xa1").pc); }
    #[test] fn uefff() { skipped(b"\xef\xff"); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn load_delay_timer()  { assert_eq!(0x0, run_single_op(b"\xf7\x07").v[7]);         }
    #[test] fn wait_for_key()      { assert!(run_single_op(b"\xf0\x0a").state.is_waiting());  }
    #[test] fn store_delay_timer() { assert_eq!(0xf, run_single_op(b"\xff\x15").delay());      }
    #[test] fn store_sound_timer() { assert_eq!(0xf, run_single_op(b"\xff\x18").sound());      }
    #[test] fn add_i()             { assert_eq!(0x0, run_single_op(b"\xf0\x1e").i);            }
    #[test] fn load_sprite()       { assert_eq!(0x50, run_single_op(b"\xf0\x29").i);           }
    #[test] fn bcd_convert()       { assert_eq!(Some(&[0, 1, 5][..]), run_single_op(b"\xff\x33").mem.grab(0..3)); }
    #[test] fn store_dma()         { assert_eq!(INDX, run_single_op(b"\xff\x55").v());         }
    #[test] fn load_dma()          { assert_eq!([0;16], run_single_op(b"\xff\x65").v());       }
    // unimplemented
    #[test] fn uffff() { skipped(b"\xff\xff"); }
}

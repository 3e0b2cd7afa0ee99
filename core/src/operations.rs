use rand::Rng;

use crate::constants::GLYPH_HEIGHT;
use crate::error::Fault;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// Every operation mutates the state in place and leaves the program counter pointing at
/// the next instruction to run.
pub type Execution = Result<(), Fault>;

/// clear
pub fn clr(_op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.frame_buffer.clear();
    state.registers.advance();
    Ok(())
}

/// PC = STACK.pop() + 2
/// The call site was pushed before being advanced past, so step over it on the way back.
pub fn rts(_op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let call_site = state.registers.pop()?;
    state.registers.jump(call_site);
    state.registers.advance();
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.registers.jump(op.addr());
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let pc = state.registers.pc;
    state.registers.push(pc)?;
    state.registers.jump(op.addr());
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.skip_if(r.v[op.x()] == op.kk());
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.skip_if(r.v[op.x()] != op.kk());
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.skip_if(r.v[op.x()] == r.v[op.y()]);
    Ok(())
}

/// Vx = kk
pub fn load(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.registers.v[op.x()] = op.kk();
    state.registers.advance();
    Ok(())
}

/// Vx += kk
/// Overflow is dropped and VF is left alone.
pub fn add(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.v[op.x()] = r.v[op.x()].wrapping_add(op.kk());
    r.advance();
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.v[op.x()] = r.v[op.y()];
    r.advance();
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.v[op.x()] |= r.v[op.y()];
    r.advance();
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.v[op.x()] &= r.v[op.y()];
    r.advance();
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.v[op.x()] ^= r.v[op.y()];
    r.advance();
    Ok(())
}

/// VF = overflow; Vx += Vy
pub fn addr(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    let (res, over) = r.v[op.x()].overflowing_add(r.v[op.y()]);
    r.set_flag(over);
    r.v[op.x()] = res;
    r.advance();
    Ok(())
}

/// VF = !underflow; Vx -= Vy
pub fn sub(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    let (res, under) = r.v[op.x()].overflowing_sub(r.v[op.y()]);
    r.set_flag(!under);
    r.v[op.x()] = res;
    r.advance();
    Ok(())
}

/// VF = lsb; Vx >>= 1
pub fn shr(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    let vx = r.v[op.x()];
    r.v[0xF] = vx & 0x1;
    r.v[op.x()] = vx >> 1;
    r.advance();
    Ok(())
}

/// VF = msb; Vx <<= 1
pub fn shl(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    let vx = r.v[op.x()];
    r.v[0xF] = vx >> 7;
    r.v[op.x()] = vx << 1;
    r.advance();
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.skip_if(r.v[op.x()] != r.v[op.y()]);
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.registers.set_i(op.addr());
    state.registers.advance();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.jump(op.addr() + u16::from(r.v[0x0]));
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let rand_byte: u8 = state.rng.gen();
    state.registers.v[op.x()] = rand_byte & op.kk();
    state.registers.advance();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased.
pub fn draw(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    let x = r.v[op.x()] as usize;
    let y = r.v[op.y()] as usize;

    // VF ends up 0 unless some pixel was erased
    let mut collided = false;
    for row in 0..op.n() {
        let sprite_byte = state.memory.read(r.i.wrapping_add(u16::from(row)));
        for bit in 0..8 {
            if sprite_byte & (0x80 >> bit) != 0 {
                collided |= state.frame_buffer.toggle(x + bit, y + row as usize);
            }
        }
    }

    r.set_flag(collided);
    state.frame_buffer.mark_dirty();
    r.advance();
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State, keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.skip_if(keypad.is_pressed(r.v[op.x()]));
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State, keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.skip_if(!keypad.is_pressed(r.v[op.x()]));
    Ok(())
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.registers.v[op.x()] = state.timers.delay;
    state.registers.advance();
    Ok(())
}

/// await keypress for Vx
/// Doesn't advance until some key is down, so the same instruction is fetched again on the
/// next cycle.
pub fn keyd(op: Opcode, state: &mut State, keypad: &Keypad) -> Execution {
    match keypad.first_pressed() {
        Some(key) => {
            state.registers.v[op.x()] = key;
            state.register_needing_key = None;
            state.registers.advance();
        }
        None => state.register_needing_key = Some(op.x() as u8),
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.timers.delay = state.registers.v[op.x()];
    state.registers.advance();
    Ok(())
}

/// ST = Vx
pub fn ld(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    state.timers.sound = state.registers.v[op.x()];
    state.registers.advance();
    Ok(())
}

/// I += Vx
pub fn addi(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.set_i(r.i + u16::from(r.v[op.x()]));
    r.advance();
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    r.set_i(u16::from(r.v[op.x()]) * GLYPH_HEIGHT);
    r.advance();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    let vx = r.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in (0u16..).zip(digits.iter()) {
        state.memory.write(r.i.wrapping_add(offset), *digit);
    }
    r.advance();
    Ok(())
}

/// mem[I..I+x] = V0..Vx
/// Fill memory starting at address I with V0 up to, but not including, Vx
pub fn stor(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    for (offset, value) in (0u16..).zip(r.v[..op.x()].iter()) {
        state.memory.write(r.i.wrapping_add(offset), *value);
    }
    r.advance();
    Ok(())
}

/// V0..Vx = mem[I..I+x]
/// Fill V0 up to, but not including, Vx with memory starting at address I
pub fn read(op: Opcode, state: &mut State, _keypad: &Keypad) -> Execution {
    let r = &mut state.registers;
    for offset in 0..op.x() {
        r.v[offset] = state.memory.read(r.i.wrapping_add(offset as u16));
    }
    r.advance();
    Ok(())
}

use super::adapters::{number, number_list, one_number, truth, two_numbers};
use super::Module;
use crate::interpolator::Interpolator;
use crate::value::{parse_number, Value};
use std::cmp::Ordering;

pub(crate) const MODULE: Module = Module {
    name: "math",
    functions: &[
        ("pi", pi),
        ("isnan", isnan),
        ("abs", abs),
        ("acos", acos),
        ("asin", asin),
        ("atan", atan),
        ("atan2", atan2),
        ("ceil", ceil),
        ("cos", cos),
        ("cosh", cosh),
        ("deg", deg),
        ("div", div),
        ("exp", exp),
        ("floor", floor),
        ("fmod", fmod),
        ("frexp", frexp),
        ("int", int),
        ("ldexp", ldexp),
        ("log", log),
        ("log10", log10),
        ("max", max),
        ("min", min),
        ("mod", modulo),
        ("modf", modf),
        ("mul", mul),
        ("num", num),
        ("pow", pow),
        ("rad", rad),
        ("sin", sin),
        ("sinh", sinh),
        ("sqrt", sqrt),
        ("subtract", subtract),
        ("tan", tan),
        ("tanh", tanh),
        ("add", add),
    ],
};

fn pi(_: &mut Interpolator, _: &[Value]) -> Option<Value> {
    Some(number(std::f64::consts::PI))
}

fn isnan(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(one_number(args)?.is_nan())
}

fn abs(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.abs()))
}

fn acos(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.acos()))
}

fn asin(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.asin()))
}

fn atan(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.atan()))
}

fn atan2(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(y, x)| number(y.atan2(x)))
}

fn ceil(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.ceil()))
}

fn cos(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.cos()))
}

fn cosh(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.cosh()))
}

fn deg(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.to_degrees()))
}

fn div(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a / b))
}

fn exp(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.exp()))
}

fn floor(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.floor()))
}

/// Remainder with the sign of the dividend, like C `fmod`.
fn fmod(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a % b))
}

/// Mantissa and exponent such that `m * 2^e` recovers the input, with
/// `0.5 <= |m| < 1` for finite non-zero inputs. Two results, listed.
fn frexp(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let n = one_number(args)?;
    let (m, e) = frexp_parts(n);
    Some(number_list(&[m, e]))
}

fn frexp_parts(n: f64) -> (f64, f64) {
    if n == 0.0 || !n.is_finite() {
        return (n, 0.0);
    }
    let mut m = n;
    let mut e = 0i32;
    while m.abs() >= 1.0 {
        m /= 2.0;
        e += 1;
    }
    while m.abs() < 0.5 {
        m *= 2.0;
        e -= 1;
    }
    (m, f64::from(e))
}

/// Integer part, truncated toward zero.
fn int(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.trunc()))
}

fn ldexp(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(m, e)| number(m * 2f64.powi(e as i32)))
}

fn log(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.ln()))
}

fn log10(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.log10()))
}

fn max(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    pick(args, Ordering::Greater)
}

fn min(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    pick(args, Ordering::Less)
}

/// Numeric extremum when every argument parses as a number, text extremum
/// otherwise. Returns the winning argument as given.
fn pick(args: &[Value], want: Ordering) -> Option<Value> {
    if args.is_empty() {
        return None;
    }
    let texts: Vec<String> = args.iter().map(|value| value.to_string()).collect();
    let numbers: Option<Vec<f64>> = texts.iter().map(|text| parse_number(text)).collect();
    let mut best = 0;
    match numbers {
        Some(numbers) => {
            for i in 1..numbers.len() {
                if numbers[i].partial_cmp(&numbers[best])? == want {
                    best = i;
                }
            }
        }
        None => {
            for i in 1..texts.len() {
                if texts[i].cmp(&texts[best]) == want {
                    best = i;
                }
            }
        }
    }
    Some(Value::Str(texts[best].clone()))
}

/// Remainder with the sign of the divisor (floored division).
fn modulo(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a - (a / b).floor() * b))
}

/// Integer and fractional parts, both carrying the input's sign. Two
/// results, listed.
fn modf(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let n = one_number(args)?;
    Some(number_list(&[n.trunc(), n.fract()]))
}

fn mul(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a * b))
}

/// Normalize text to a number.
fn num(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(number)
}

fn pow(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a.powf(b)))
}

fn rad(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.to_radians()))
}

fn sin(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.sin()))
}

fn sinh(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.sinh()))
}

fn sqrt(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.sqrt()))
}

fn subtract(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a - b))
}

fn tan(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.tan()))
}

fn tanh(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    one_number(args).map(|n| number(n.tanh()))
}

fn add(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    two_numbers(args).map(|(a, b)| number(a + b))
}

use super::adapters::{branch, compare, truth};
use super::Module;
use crate::interpolator::Interpolator;
use crate::value::Value;
use std::cmp::Ordering;

pub(crate) const MODULE: Module = Module {
    name: "boolean",
    functions: &[
        ("not", not),
        ("eq", eq),
        ("neq", neq),
        ("gt", gt),
        ("lt", lt),
        ("gte", gte),
        ("lte", lte),
        ("any", any),
        ("all", all),
        ("if", if_),
        ("unless", unless),
        ("ifelse", ifelse),
    ],
};

fn not(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(!args.first().is_some_and(Value::is_truthy))
}

fn eq(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(compare(args)? == Ordering::Equal)
}

fn neq(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(compare(args)? != Ordering::Equal)
}

fn gt(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(compare(args)? == Ordering::Greater)
}

fn lt(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(compare(args)? == Ordering::Less)
}

fn gte(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(compare(args)? != Ordering::Less)
}

fn lte(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    truth(compare(args)? != Ordering::Greater)
}

/// The first truthy argument, as given.
fn any(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    args.iter().find(|value| value.is_truthy()).cloned()
}

/// The last argument, provided every argument is truthy.
fn all(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    if args.is_empty() || !args.iter().all(Value::is_truthy) {
        return None;
    }
    args.last().cloned()
}

fn if_(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let condition = args.first()?;
    if condition.is_truthy() {
        branch(&args[1..])
    } else {
        None
    }
}

fn unless(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let condition = args.first()?;
    if condition.is_truthy() {
        None
    } else {
        branch(&args[1..])
    }
}

fn ifelse(_: &mut Interpolator, args: &[Value]) -> Option<Value> {
    let condition = args.first()?;
    if condition.is_truthy() {
        args.get(1).cloned()
    } else {
        branch(args.get(2..).unwrap_or(&[]))
    }
}
